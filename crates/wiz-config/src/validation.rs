//! Validation engine settings.

use serde::{Deserialize, Serialize};
use wiz_core::PathStyle;

const fn default_field_context() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Join format for error map keys (`bracket` or `dotted`).
    #[serde(default)]
    pub path_style: PathStyle,

    /// Ignore undeclared document keys instead of reporting them.
    #[serde(default)]
    pub allow_unknown: bool,

    /// Resolve conditional siblings from the submitted document when
    /// validating a single field.
    #[serde(default = "default_field_context")]
    pub field_context: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            path_style: PathStyle::default(),
            allow_unknown: false,
            field_context: default_field_context(),
        }
    }
}
