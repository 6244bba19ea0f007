//! Per-source schema definitions.
//!
//! Each source composes the shared [`base`] fields with its own. Factories
//! build a fresh, checked [`Schema`] on every call.

pub mod base;
pub mod primary;
pub mod secondary;
pub mod tertiary;

use wiz_core::SourceId;

use crate::error::SchemaError;
use crate::rule::Schema;

/// Builds a checked schema for one source.
pub type SchemaFactory = fn() -> Result<Schema, SchemaError>;

/// The factory registered for `source`.
#[must_use]
pub const fn factory(source: SourceId) -> SchemaFactory {
    match source {
        SourceId::Primary => primary::schema,
        SourceId::Secondary => secondary::schema,
        SourceId::Tertiary => tertiary::schema,
    }
}
