//! Error types shared across scenec crates.

use crate::ast::NodeId;
use crate::diagnostics::Diagnostic;
use thiserror::Error;

/// A document failed validation. No partial output is produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("document failed validation ({} problem(s)){}", .diagnostics.len(), format_first(.diagnostics))]
pub struct ValidationError {
    /// Offending node ids, in document order, without repeats
    pub node_ids: Vec<NodeId>,
    /// One error diagnostic per problem found
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationError {
    /// Build from error diagnostics, collecting the distinct node ids they name.
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let mut node_ids: Vec<NodeId> = Vec::new();
        for id in diagnostics.iter().filter_map(|d| d.node_id.as_ref()) {
            if !node_ids.contains(id) {
                node_ids.push(id.clone());
            }
        }
        Self {
            node_ids,
            diagnostics,
        }
    }
}

fn format_first(diagnostics: &[Diagnostic]) -> String {
    match diagnostics.first() {
        Some(first) => format!(": {}", first),
        None => String::new(),
    }
}
