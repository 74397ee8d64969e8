//! Template engine for component modules.

use crate::error::{CodegenError, Result};
use crate::markup::{escape_attribute, Markup};
use handlebars::Handlebars;
use serde::Serialize;
use std::borrow::Cow;

const COMPONENT_MODULE: &str = include_str!("templates/component.tsx.hbs");
const HTML_DOCUMENT: &str = include_str!("templates/document.html.hbs");

/// Template engine using Handlebars, with the built-in module templates registered.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create a new template engine.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        // Output is source code, not HTML to be escaped.
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        Self::register_helpers(&mut handlebars);

        let mut engine = Self { handlebars };
        engine.register_template("component", COMPONENT_MODULE)?;
        engine.register_template("document", HTML_DOCUMENT)?;
        Ok(engine)
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }

    /// Register custom helpers.
    fn register_helpers(handlebars: &mut Handlebars) {
        // Pascal case helper
        handlebars.register_helper(
            "pascal_case",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let param = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    out.write(&to_pascal_case(param))?;
                    Ok(())
                },
            ),
        );

        // Indent helper
        handlebars.register_helper(
            "indent",
            Box::new(
                |h: &handlebars::Helper,
                 _r: &Handlebars,
                 _ctx: &handlebars::Context,
                 _rc: &mut handlebars::RenderContext,
                 out: &mut dyn handlebars::Output| {
                    let content = h
                        .param(0)
                        .and_then(|v| v.value().as_str())
                        .unwrap_or("");
                    let spaces = h
                        .param(1)
                        .and_then(|v| v.value().as_u64())
                        .unwrap_or(2) as usize;

                    let indent = " ".repeat(spaces);
                    let indented = content
                        .lines()
                        .map(|line| {
                            if line.trim().is_empty() {
                                line.to_string()
                            } else {
                                format!("{}{}", indent, line)
                            }
                        })
                        .collect::<Vec<_>>()
                        .join("\n");
                    out.write(&indented)?;
                    Ok(())
                },
            ),
        );
    }
}

/// Convert to PascalCase, falling back to `Component` when nothing is left.
fn to_pascal_case(s: &str) -> String {
    use convert_case::{Case, Casing};
    let name: String = s
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_case(Case::Pascal);
    match name.chars().next() {
        None => "Component".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Component{}", name),
        Some(_) => name,
    }
}

#[derive(Serialize)]
struct ComponentData<'a> {
    name: Cow<'a, str>,
    stylesheet: Cow<'a, str>,
    body: String,
}

/// Render a React function component module that imports its stylesheet.
///
/// `stylesheet` is the CSS file name the module imports (e.g. `Card.css`).
pub fn render_component_module(name: &str, markup: &Markup, stylesheet: &str) -> Result<String> {
    let engine = TemplateEngine::new()?;
    engine.render(
        "component",
        &ComponentData {
            name: Cow::Borrowed(name),
            stylesheet: Cow::Borrowed(stylesheet),
            body: markup.to_jsx_expression(),
        },
    )
}

/// Render a standalone HTML document that links its stylesheet.
///
/// The name and stylesheet land in `<title>` and `href`, so both are escaped.
pub fn render_html_document(name: &str, markup: &Markup, stylesheet: &str) -> Result<String> {
    let engine = TemplateEngine::new()?;
    engine.render(
        "document",
        &ComponentData {
            name: Cow::Owned(escape_attribute(name)),
            stylesheet: Cow::Owned(escape_attribute(stylesheet)),
            body: markup.to_html(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{Element, MarkupNode};

    fn card() -> Markup {
        let mut card = Element::new("div").with_class(Some("card".into()));
        card.children.push(MarkupNode::Element(
            Element::new("p").with_class(Some("title".into())),
        ));
        Markup::new(vec![MarkupNode::Element(card)])
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("pricing card"), "PricingCard");
        assert_eq!(to_pascal_case("my_component"), "MyComponent");
        assert_eq!(to_pascal_case("***"), "Component");
        assert_eq!(to_pascal_case("404 page"), "Component404Page");
    }

    #[test]
    fn test_component_module() {
        let module = render_component_module("pricing card", &card(), "PricingCard.css").unwrap();
        assert_eq!(
            module,
            "import React from 'react';\n\
             import './PricingCard.css';\n\
             \n\
             export function PricingCard() {\n\
             \x20 return (\n\
             \x20   <div className=\"card\">\n\
             \x20     <p className=\"title\" />\n\
             \x20   </div>\n\
             \x20 );\n\
             }\n\
             \n\
             export default PricingCard;\n"
        );
    }

    #[test]
    fn test_html_document_links_stylesheet() {
        let html = render_html_document("Card", &card(), "Card.css").unwrap();
        assert!(html.contains("<link rel=\"stylesheet\" href=\"Card.css\">"));
        assert!(html.contains("<body>\n  <div class=\"card\">\n"));
        assert!(html.contains("<title>Card</title>"));
    }

    #[test]
    fn test_html_document_escapes_name() {
        let html =
            render_html_document("</title><script>x</script>", &card(), "a\"b.css").unwrap();
        assert!(html.contains("<title>&lt;/title&gt;&lt;script&gt;x&lt;/script&gt;</title>"));
        assert!(html.contains("href=\"a&quot;b.css\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_custom_template() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register_template("hello", "Hello, {{pascal_case name}}!")
            .unwrap();
        let result = engine
            .render("hello", &serde_json::json!({"name": "my widget"}))
            .unwrap();
        assert_eq!(result, "Hello, MyWidget!");
    }
}
