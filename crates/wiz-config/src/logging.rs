//! Log filter settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

fn default_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter when `WIZ_LOG` is unset. Either a bare level
    /// (`info`) or an `EnvFilter` directive list (`wiz_schema=debug,warn`).
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    /// Reject empty filters and unknown bare levels. Directive lists are
    /// left to the subscriber to parse.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming `logging.level`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.trim();
        let is_directive = level.contains('=') || level.contains(',');
        if level.is_empty() || !(is_directive || LEVELS.contains(&level.to_ascii_lowercase().as_str())) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("expected one of {} or a filter directive, got '{}'", LEVELS.join("|"), self.level),
            });
        }
        Ok(())
    }
}
