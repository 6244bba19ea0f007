//! # wiz-config
//!
//! Layered configuration loading for wiz using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WIZ_*` prefix, `__` as separator)
//! 2. Project-level `.wiz/config.toml`
//! 3. User-level `~/.config/wiz/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WIZ_VALIDATION__PATH_STYLE` -> `validation.path_style`,
//! `WIZ_LOGGING__LEVEL` -> `logging.level`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use wiz_config::WizConfig;
//!
//! let config = WizConfig::load_with_dotenv().expect("config");
//! if config.validation.allow_unknown {
//!     println!("unknown keys are ignored");
//! }
//! ```

mod error;
mod logging;
mod validation;

pub use error::ConfigError;
pub use logging::LoggingConfig;
pub use validation::ValidationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var prefix for config overrides.
pub const ENV_PREFIX: &str = "WIZ_";

/// Dotenv file read by [`WizConfig::load_with_dotenv`].
pub const DOTENV_FILE: &str = ".env";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WizConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WizConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source fails to parse or a value
    /// has the wrong shape, and `ConfigError::InvalidValue` if a value is
    /// out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.logging.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory (if any), then the layered
    /// configuration. Variables already set in the process win over `.env`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Dotenv` if `.env` exists but cannot be parsed,
    /// otherwise the same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv()?;
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".wiz/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wiz").join("config.toml"))
    }

    /// Load `.env` from the working directory. A missing file is not an
    /// error; a malformed one is.
    fn load_dotenv() -> Result<(), ConfigError> {
        let env_path = Path::new(DOTENV_FILE);
        if !env_path.exists() {
            return Ok(());
        }
        dotenvy::from_path(env_path).map_err(|source| ConfigError::Dotenv {
            path: env_path.display().to_string(),
            source,
        })
    }
}
