//! Core types for the scenec design compiler.
//!
//! This crate provides the foundational types used across all other scenec crates:
//! - Scene-graph node types (frames, text, shapes, instances)
//! - Paint, effect and typography value types
//! - The explicit defaults table applied while parsing
//! - Diagnostics and the validation error

pub mod ast;
pub mod defaults;
pub mod diagnostics;
pub mod errors;
pub mod types;

pub use ast::*;
pub use diagnostics::*;
pub use errors::*;
pub use types::*;
