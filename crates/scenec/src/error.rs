//! Error types for compilation and the retrieval pipeline.

use crate::collab::CollaboratorError;
use scenec_codegen::CodegenError;
use scenec_parser::ParseError;
use thiserror::Error;

/// Result type alias for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Errors that abort a compile. No partial output is produced.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The document could not be parsed or failed validation.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The requested subtree root is not in the document.
    #[error("root node not found: {id}")]
    RootNotFound { id: String },

    /// Emission failed.
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl CompileError {
    /// Error diagnostics when the document failed validation.
    pub fn validation_diagnostics(&self) -> Option<&[scenec_core::Diagnostic]> {
        match self {
            Self::Parse(ParseError::Validation(err)) => Some(err.diagnostics.as_slice()),
            _ => None,
        }
    }
}

/// Errors from [`Pipeline`](crate::Pipeline) runs.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A collaborator failed; surfaced as-is.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The URL names no design file.
    #[error("no file key in URL: {0}")]
    InvalidUrl(String),
}
