use anyhow::Context;
use wiz_config::{ValidationConfig, WizConfig};
use wiz_schema::{ServiceSettings, ValidationOptions, ValidationService};

/// Load `.env` from the working directory (if any), then the layered config.
pub fn load_config() -> anyhow::Result<WizConfig> {
    WizConfig::load_with_dotenv().context("failed to load wiz configuration")
}

/// Map the `[validation]` config section onto engine settings.
pub const fn service_settings(config: &ValidationConfig) -> ServiceSettings {
    ServiceSettings {
        options: ValidationOptions {
            allow_unknown: config.allow_unknown,
        },
        path_style: config.path_style,
        field_context: config.field_context,
    }
}

/// Build the validation service; fails if any source schema is malformed.
pub fn build_service(config: &WizConfig) -> anyhow::Result<ValidationService> {
    let settings = service_settings(&config.validation);
    tracing::debug!(
        path_style = %settings.path_style,
        allow_unknown = settings.options.allow_unknown,
        field_context = settings.field_context,
        "building validation service"
    );
    ValidationService::with_settings(settings).context("failed to build source schemas")
}
