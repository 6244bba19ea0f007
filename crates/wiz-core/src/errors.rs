//! Cross-cutting error types for the wizard validation crates.
//!
//! Schema-specific errors live in `wiz-schema`, configuration errors in
//! `wiz-config`. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any wizard crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The identifier does not name a registered data source.
    #[error("Unknown data source: {0}")]
    UnknownSource(String),

    /// A field path string could not be parsed.
    #[error("Invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}
