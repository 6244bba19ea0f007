//! Validation results handed back across the public boundary.
//!
//! Both shapes serialize in the form layer's camelCase keyspace.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::normalize::FlattenedErrors;

/// Outcome of validating a whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentValidation {
    pub is_valid: bool,
    pub errors: FlattenedErrors,
}

impl DocumentValidation {
    #[must_use]
    pub fn from_errors(errors: FlattenedErrors) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Outcome of validating one field: at most one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl FieldValidation {
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_result_serializes_camel_case() {
        let value = serde_json::to_value(FieldValidation::invalid("nope")).unwrap();
        assert_eq!(value, json!({"isValid": false, "error": "nope"}));
        let value = serde_json::to_value(FieldValidation::valid()).unwrap();
        assert_eq!(value, json!({"isValid": true, "error": null}));
    }

    #[test]
    fn document_result_is_valid_iff_no_errors() {
        let empty = DocumentValidation::from_errors(FlattenedErrors::default());
        assert!(empty.is_valid);

        let mut errors = FlattenedErrors::default();
        errors.insert("projectName", "Project name is required");
        let failed = DocumentValidation::from_errors(errors);
        assert!(!failed.is_valid);
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"isValid": false, "errors": {"projectName": "Project name is required"}})
        );
    }
}
