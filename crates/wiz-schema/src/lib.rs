//! # wiz-schema
//!
//! Schema-driven validation for the campaign/project wizard.
//!
//! This crate provides:
//! - A rule tree ([`Schema`]) with chainable builders and construction checks
//! - Per-source schema definitions composed from a shared base
//! - `SchemaRegistry`: one checked schema per data source, built at startup
//! - The validator engine: whole-document (every violation) and single-field
//!   (first violation) validation
//! - The field-path resolver and the error-path normalizer
//! - `ValidationService`: the two operations the form layer calls
//! - JSON Schema export and blank-document skeletons for external tooling
//!
//! ## Architecture
//!
//! Paths and source identifiers live in `wiz-core`. Schemas are immutable
//! once built; every validate call is a pure function of schema and input,
//! so a registry can be shared across threads without locking.

pub mod builder;
pub mod error;
pub mod export;
pub mod message;
pub mod normalize;
pub mod registry;
pub mod report;
pub mod resolve;
pub mod rule;
pub mod service;
pub mod skeleton;
pub mod sources;
pub mod validate;

pub use error::SchemaError;
pub use message::ViolationKind;
pub use normalize::{FlattenedErrors, flatten_error_tree, format_validation_errors};
pub use registry::SchemaRegistry;
pub use report::{DocumentValidation, FieldValidation};
pub use resolve::{extract, extract_str};
pub use rule::Schema;
pub use service::{ServiceSettings, ValidationService};
pub use validate::{
    ValidationError, ValidationOptions, validate_document, validate_document_with, validate_field,
    validate_field_in,
};
