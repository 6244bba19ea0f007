use std::process::ExitCode;

use wiz_schema::ValidationService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: &Commands,
    service: &ValidationService,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    match command {
        Commands::Validate(args) => commands::validate::handle(args, service, flags),
        Commands::Field(args) => commands::field::handle(args, service, flags),
        Commands::Flatten(args) => commands::flatten::handle(args, service, flags),
        Commands::Sources => commands::sources::handle(service, flags),
        Commands::Schema(args) => commands::schema::handle(args, service, flags),
    }
}
