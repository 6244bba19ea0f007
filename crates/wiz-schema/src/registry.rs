//! Central schema registry for all data sources.
//!
//! The `SchemaRegistry` builds every source schema at construction time, so
//! a malformed definition fails once at startup instead of on a validate
//! call. Lookups hand out shared references to the memoized schemas;
//! [`SchemaRegistry::create_schema`] builds a fresh instance on demand.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;
use wiz_core::SourceId;

use crate::error::SchemaError;
use crate::rule::Schema;
use crate::sources;
use crate::validate::{ValidationError, ValidationOptions, validate_document_with};

/// Store of one checked schema per data source.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<SourceId, Schema>,
}

impl SchemaRegistry {
    /// Build a registry containing every source schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Construction` for the first malformed source
    /// definition.
    pub fn new() -> Result<Self, SchemaError> {
        let mut schemas = HashMap::with_capacity(SourceId::ALL.len());
        for source in SourceId::ALL {
            schemas.insert(source, Self::create_schema(source)?);
        }
        debug!(count = schemas.len(), "schema registry built");
        Ok(Self { schemas })
    }

    /// Build a fresh schema for `source`, independent of the memoized one.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Construction` if the definition is malformed.
    pub fn create_schema(source: SourceId) -> Result<Schema, SchemaError> {
        sources::factory(source)()
    }

    /// Get the schema for a source identifier such as `"primary"`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the identifier is unknown.
    pub fn get(&self, source: &str) -> Result<&Schema, SchemaError> {
        source
            .parse::<SourceId>()
            .ok()
            .and_then(|id| self.schemas.get(&id))
            .ok_or_else(|| SchemaError::NotFound(source.to_string()))
    }

    /// Validate a document against a named source schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the source is unknown. Violations
    /// are returned in the `Ok` vector.
    pub fn validate(
        &self,
        source: &str,
        document: &Value,
        options: ValidationOptions,
    ) -> Result<Vec<ValidationError>, SchemaError> {
        let schema = self.get(source)?;
        Ok(validate_document_with(schema, document, options))
    }

    /// Registered source identifiers, in declaration order.
    #[must_use]
    pub fn sources(&self) -> Vec<SourceId> {
        SourceId::ALL
            .into_iter()
            .filter(|id| self.schemas.contains_key(id))
            .collect()
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}
