//! Out-of-core collaborators: retrieval, optimization and export.
//!
//! None of these run inside [`compile`](crate::compile). Hosts implement them
//! and wire them together with a [`Pipeline`](crate::Pipeline).

use scenec_codegen::{Markup, Stylesheet};
use thiserror::Error;

/// Errors reported by collaborators. Never retried by this crate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("network error: {0}")]
    Network(String),

    /// Credentials missing or rejected (401/403).
    #[error("authentication failed (status {status})")]
    Auth { status: u16 },

    /// Too many requests (429).
    #[error("rate limited{}", retry_hint(.retry_after))]
    RateLimited {
        /// Seconds to wait, when the service said
        retry_after: Option<u64>,
    },

    #[error("document not found")]
    NotFound,

    #[error("optimizer failed: {0}")]
    Optimizer(String),

    #[error("export failed: {0}")]
    Export(String),
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(seconds) => format!(", retry after {}s", seconds),
        None => String::new(),
    }
}

impl CollaboratorError {
    /// Map a failed HTTP status from the document service.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Auth { status },
            404 => Self::NotFound,
            429 => Self::RateLimited { retry_after: None },
            other => Self::Network(format!("unexpected status {}", other)),
        }
    }

    /// Whether a host-side retry could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::RateLimited { .. })
    }
}

/// Fetches raw design documents.
pub trait DocumentRetriever: Send + Sync {
    /// Fetch the raw JSON of a design file.
    fn fetch(&self, file_key: &str) -> Result<String, CollaboratorError>;
}

/// A refined markup tree and stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Refinement {
    pub markup: Markup,
    pub stylesheet: Stylesheet,
}

/// Best-effort post-processing of compiler output.
pub trait Optimizer: Send + Sync {
    fn improve(
        &self,
        markup: &Markup,
        stylesheet: &Stylesheet,
    ) -> Result<Refinement, CollaboratorError>;
}

/// What an exporter produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportArtifact {
    /// Archive bytes
    Archive(Vec<u8>),
    /// Location of an uploaded copy
    Remote(String),
}

/// Packages compiler output for delivery.
pub trait Exporter: Send + Sync {
    fn package(
        &self,
        markup: &Markup,
        stylesheet: &Stylesheet,
        name: &str,
    ) -> Result<ExportArtifact, CollaboratorError>;
}
