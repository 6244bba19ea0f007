use std::process::ExitCode;

use anyhow::bail;
use schemars::schema_for;
use wiz_schema::export::to_titled_json_schema;
use wiz_schema::skeleton::initial_document;
use wiz_schema::{DocumentValidation, FieldValidation, ValidationService};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ResponseKind, SchemaArgs};
use crate::output::output;

/// Handle `wiz schema`.
pub fn handle(
    args: &SchemaArgs,
    service: &ValidationService,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    let value = match (args.source.as_deref(), args.response) {
        (_, Some(ResponseKind::Document)) => serde_json::to_value(schema_for!(DocumentValidation))?,
        (_, Some(ResponseKind::Field)) => serde_json::to_value(schema_for!(FieldValidation))?,
        (Some(source), None) => {
            let schema = service.registry().get(source)?;
            if args.skeleton {
                initial_document(schema)
            } else {
                to_titled_json_schema(schema, source)
            }
        }
        (None, None) => bail!("pass a SOURCE or --response document|field"),
    };
    output(&value, flags.format)?;
    Ok(ExitCode::SUCCESS)
}
