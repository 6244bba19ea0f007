//! # wiz-core
//!
//! Core types shared by the wizard validation crates.
//!
//! This crate provides:
//! - `SourceId`: the pluggable data sources a campaign/project can target
//! - `FieldPath` and `PathSegment`: the path model connecting validation
//!   results to form fields, with bracket (`groups[0].name`) and dotted
//!   (`groups.0.name`) renderings
//! - Cross-cutting error types

pub mod errors;
pub mod path;
pub mod source;

pub use errors::CoreError;
pub use path::{FieldPath, GENERAL_ERROR_KEY, PathSegment, PathStyle};
pub use source::SourceId;
