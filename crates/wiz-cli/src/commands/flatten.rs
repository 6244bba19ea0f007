use std::process::ExitCode;

use wiz_schema::{ValidationService, flatten_error_tree};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FlattenArgs;
use crate::commands::shared::input::read_json;
use crate::output::output;

/// Handle `wiz flatten`.
pub fn handle(
    args: &FlattenArgs,
    service: &ValidationService,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    let tree = read_json(&args.file)?;
    let flat = flatten_error_tree(&tree, &args.prefix, service.settings().path_style);
    output(&flat, flags.format)?;
    Ok(ExitCode::SUCCESS)
}
