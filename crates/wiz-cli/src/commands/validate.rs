use std::process::ExitCode;

use wiz_schema::ValidationService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ValidateArgs;
use crate::commands::shared::{input::read_json, verdict};
use crate::output::output;

/// Handle `wiz validate`.
pub fn handle(
    args: &ValidateArgs,
    service: &ValidationService,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    let document = read_json(&args.file)?;
    let result = service.validate_entire_document(&args.source, &document);
    tracing::info!(
        source = %args.source,
        valid = result.is_valid,
        errors = result.errors.len(),
        "document validated"
    );
    output(&result, flags.format)?;
    Ok(verdict(result.is_valid))
}
