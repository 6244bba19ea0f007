//! The two operations the form layer calls.
//!
//! Neither operation returns `Err`: an unknown source becomes a structured
//! "Invalid data source" result, and violations become messages.

use serde_json::Value;
use tracing::debug;
use wiz_core::PathStyle;

use crate::error::SchemaError;
use crate::normalize::{FlattenedErrors, format_validation_errors};
use crate::registry::SchemaRegistry;
use crate::report::{DocumentValidation, FieldValidation};
use crate::validate::{ValidationOptions, validate_document_with, validate_field_in};

/// Message returned for an unrecognized source identifier.
pub const INVALID_SOURCE_MESSAGE: &str = "Invalid data source";

/// Engine settings, usually mapped from the `[validation]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    pub options: ValidationOptions,
    /// Join format for error map keys.
    pub path_style: PathStyle,
    /// Use the supplied document as sibling context for single-field checks.
    pub field_context: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            options: ValidationOptions::default(),
            path_style: PathStyle::Bracket,
            field_context: true,
        }
    }
}

/// Whole-document and single-field validation over the schema registry.
#[derive(Debug, Clone)]
pub struct ValidationService {
    registry: SchemaRegistry,
    settings: ServiceSettings,
}

impl ValidationService {
    /// # Errors
    ///
    /// Returns `SchemaError::Construction` if a source schema is malformed.
    pub fn new() -> Result<Self, SchemaError> {
        Self::with_settings(ServiceSettings::default())
    }

    /// # Errors
    ///
    /// Returns `SchemaError::Construction` if a source schema is malformed.
    pub fn with_settings(settings: ServiceSettings) -> Result<Self, SchemaError> {
        Ok(Self {
            registry: SchemaRegistry::new()?,
            settings,
        })
    }

    #[must_use]
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Validate a whole document and flatten every violation into the
    /// error map.
    #[must_use]
    pub fn validate_entire_document(&self, source: &str, document: &Value) -> DocumentValidation {
        let Ok(schema) = self.registry.get(source) else {
            debug!(source, "unknown data source");
            let mut errors = FlattenedErrors::default();
            errors.insert(wiz_core::GENERAL_ERROR_KEY, INVALID_SOURCE_MESSAGE);
            return DocumentValidation::from_errors(errors);
        };

        let violations = validate_document_with(schema, document, self.settings.options);
        debug!(source, violations = violations.len(), "validated document");
        DocumentValidation::from_errors(format_validation_errors(
            &violations,
            self.settings.path_style,
        ))
    }

    /// Validate one field value. `value` is `None` when the field is absent.
    ///
    /// Paths the schema does not declare are valid.
    #[must_use]
    pub fn validate_single_field(
        &self,
        source: &str,
        path: &str,
        value: Option<&Value>,
        document: &Value,
    ) -> FieldValidation {
        let Ok(schema) = self.registry.get(source) else {
            debug!(source, "unknown data source");
            return FieldValidation::invalid(INVALID_SOURCE_MESSAGE);
        };

        let context = self.settings.field_context.then_some(document);
        let result = validate_field_in(schema, path, value, context, self.settings.options);
        debug!(source, path, valid = result.is_valid, "validated field");
        result
    }
}
