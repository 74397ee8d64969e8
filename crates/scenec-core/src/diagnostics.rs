//! Node-addressed diagnostics returned alongside compiler output.

use crate::ast::NodeId;
use std::fmt;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    /// Node the diagnostic is about, when it can be attributed to one
    pub node_id: Option<NodeId>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, node_id: Option<NodeId>, message: impl Into<String>) -> Self {
        Self {
            severity,
            node_id,
            message: message.into(),
        }
    }

    pub fn error(node_id: Option<NodeId>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, node_id, message)
    }

    /// An unsupported-feature warning on a specific node.
    pub fn warning(node_id: &NodeId, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, Some(node_id.clone()), message)
    }

    pub fn info(node_id: Option<NodeId>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, node_id, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node_id {
            Some(id) => write!(f, "{} [{}]: {}", self.severity, id, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// An ordered list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    /// Diagnostics of one severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(move |d| d.severity == severity)
    }

    /// Diagnostics attached to one node.
    pub fn for_node<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.0
            .iter()
            .filter(move |d| d.node_id.as_ref().map(NodeId::as_str) == Some(id))
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(items: Vec<Diagnostic>) -> Self {
        Self(items)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_node() {
        let d = Diagnostic::warning(&NodeId::from("1:2"), "unsupported: multiple strokes");
        assert_eq!(d.to_string(), "warning [1:2]: unsupported: multiple strokes");
    }

    #[test]
    fn test_filters() {
        let mut all = Diagnostics::new();
        all.push(Diagnostic::warning(&NodeId::from("1:2"), "a"));
        all.push(Diagnostic::info(None, "b"));
        all.push(Diagnostic::error(Some(NodeId::from("1:3")), "c"));

        assert!(all.has_errors());
        assert_eq!(all.with_severity(Severity::Warning).count(), 1);
        assert_eq!(all.for_node("1:3").count(), 1);
        assert_eq!(all.len(), 3);
    }
}
