//! Deduplicated stylesheet.

use scenec_resolver::StyleRecord;
use serde::Serialize;

/// One class rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRule {
    pub class_name: String,
    pub declarations: Vec<(String, String)>,
}

impl StyleRule {
    pub fn new(class_name: impl Into<String>, record: &StyleRecord) -> Self {
        Self {
            class_name: class_name.into(),
            declarations: record
                .iter()
                .map(|(property, value)| (property.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, value)| value.as_str())
    }
}

/// Rules in the order their classes were minted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Stylesheet {
    rules: Vec<StyleRule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn rule(&self, class_name: &str) -> Option<&StyleRule> {
        self.rules.iter().find(|rule| rule.class_name == class_name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render as CSS text, one blank line between rules.
    pub fn to_css(&self) -> String {
        let mut blocks = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let mut lines = vec![format!(".{} {{", rule.class_name)];
            for (property, value) in &rule.declarations {
                lines.push(format!("  {}: {};", property, value));
            }
            lines.push("}".to_string());
            blocks.push(lines.join("\n"));
        }
        let mut css = blocks.join("\n\n");
        if !css.is_empty() {
            css.push('\n');
        }
        css
    }
}
