//! Schema error types.
//!
//! Validation violations are data ([`crate::ValidationError`]), not errors.
//! The variants here are the failures that are not about user input.

use thiserror::Error;

/// Errors from schema construction and the schema registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// No schema is registered for the requested data source.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// A schema definition is malformed. Raised while building schemas,
    /// never while validating documents against them.
    #[error("Invalid schema definition at '{path}': {reason}")]
    Construction { path: String, reason: String },
}

impl SchemaError {
    pub(crate) fn construction(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Construction {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
