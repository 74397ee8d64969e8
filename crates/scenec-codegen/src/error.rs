//! Error types for code emission.

use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code emission.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The walk and the resolved styles do not describe the same nodes.
    #[error("Resolution mismatch: {0}")]
    ResolutionMismatch(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// Invalid class-name pattern.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
