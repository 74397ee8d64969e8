//! Markup tree and its HTML/JSX renderings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output dialect for rendered markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupFlavor {
    Html,
    #[default]
    Jsx,
}

impl MarkupFlavor {
    /// File extension for a rendered component.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Jsx => "tsx",
        }
    }
}

impl FromStr for MarkupFlavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "jsx" | "tsx" | "react" => Ok(Self::Jsx),
            other => Err(format!("unknown markup flavor `{}` (expected html or jsx)", other)),
        }
    }
}

impl fmt::Display for MarkupFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => write!(f, "html"),
            Self::Jsx => write!(f, "jsx"),
        }
    }
}

/// A markup node: an element or a literal text span.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MarkupNode {
    Element(Element),
    Text { content: String },
}

impl MarkupNode {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text { .. } => None,
        }
    }

    /// Concatenated text content of this subtree.
    pub fn text_content(&self) -> String {
        match self {
            Self::Text { content } => content.clone(),
            Self::Element(element) => element.children.iter().map(Self::text_content).collect(),
        }
    }

    fn is_inline(&self) -> bool {
        match self {
            Self::Text { .. } => true,
            Self::Element(element) => {
                element.tag == "span" && element.children.iter().all(Self::is_inline)
            }
        }
    }
}

/// An element with its class, extra attributes and children.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub tag: String,
    pub class_name: Option<String>,
    /// Extra attributes in emission order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class_name: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, class_name: Option<String>) -> Self {
        self.class_name = class_name;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(MarkupNode::as_element)
    }
}

/// The emitted markup forest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Markup {
    pub roots: Vec<MarkupNode>,
}

impl Markup {
    pub fn new(roots: Vec<MarkupNode>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn render(&self, flavor: MarkupFlavor) -> String {
        let mut lines = Vec::new();
        for root in &self.roots {
            render_node(root, flavor, 0, &mut lines);
        }
        lines.join("\n")
    }

    pub fn to_html(&self) -> String {
        self.render(MarkupFlavor::Html)
    }

    pub fn to_jsx(&self) -> String {
        self.render(MarkupFlavor::Jsx)
    }

    /// JSX with exactly one root expression: a fragment wraps multiple
    /// roots, and an empty tree renders as `null`.
    pub fn to_jsx_expression(&self) -> String {
        match self.roots.len() {
            0 => "null".to_string(),
            1 => self.to_jsx(),
            _ => {
                let mut lines = vec!["<>".to_string()];
                for root in &self.roots {
                    render_node(root, MarkupFlavor::Jsx, 1, &mut lines);
                }
                lines.push("</>".to_string());
                lines.join("\n")
            }
        }
    }
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

fn render_node(node: &MarkupNode, flavor: MarkupFlavor, level: usize, lines: &mut Vec<String>) {
    match node {
        MarkupNode::Text { content } => {
            lines.push(format!("{}{}", indent(level), escape_text(content, flavor)));
        }
        MarkupNode::Element(element) => {
            let open = open_tag(element, flavor);
            if element.children.is_empty() {
                let empty = match flavor {
                    MarkupFlavor::Html => format!("{}></{}>", open, element.tag),
                    MarkupFlavor::Jsx => format!("{} />", open),
                };
                lines.push(format!("{}{}", indent(level), empty));
            } else if element.children.iter().all(MarkupNode::is_inline) {
                let inner: String = element
                    .children
                    .iter()
                    .map(|child| render_inline(child, flavor))
                    .collect();
                lines.push(format!("{}{}>{}</{}>", indent(level), open, inner, element.tag));
            } else {
                lines.push(format!("{}{}>", indent(level), open));
                for child in &element.children {
                    render_node(child, flavor, level + 1, lines);
                }
                lines.push(format!("{}</{}>", indent(level), element.tag));
            }
        }
    }
}

fn render_inline(node: &MarkupNode, flavor: MarkupFlavor) -> String {
    match node {
        MarkupNode::Text { content } => escape_text(content, flavor),
        MarkupNode::Element(element) => {
            let inner: String = element
                .children
                .iter()
                .map(|child| render_inline(child, flavor))
                .collect();
            format!("{}>{}</{}>", open_tag(element, flavor), inner, element.tag)
        }
    }
}

/// Opening tag without the closing `>`.
fn open_tag(element: &Element, flavor: MarkupFlavor) -> String {
    let mut tag = format!("<{}", element.tag);
    if let Some(class_name) = &element.class_name {
        let attr = match flavor {
            MarkupFlavor::Html => "class",
            MarkupFlavor::Jsx => "className",
        };
        tag.push_str(&format!(" {}=\"{}\"", attr, escape_attribute(class_name)));
    }
    for (name, value) in &element.attributes {
        tag.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
    }
    tag
}

/// Escape literal text; line breaks become `<br>` elements.
pub fn escape_text(text: &str, flavor: MarkupFlavor) -> String {
    let line_break = match flavor {
        MarkupFlavor::Html => "<br>",
        MarkupFlavor::Jsx => "<br />",
    };
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\n' => out.push_str(line_break),
            // CRLF is one break; a lone CR is a break of its own.
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push_str(line_break);
            }
            '{' if flavor == MarkupFlavor::Jsx => out.push_str("{'{'}"),
            '}' if flavor == MarkupFlavor::Jsx => out.push_str("{'}'}"),
            c => out.push(c),
        }
    }
    out
}

pub fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
