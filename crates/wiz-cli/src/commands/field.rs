use std::process::ExitCode;

use serde_json::{Map, Value};
use wiz_schema::ValidationService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::FieldArgs;
use crate::commands::shared::input::{parse_value, read_json};
use crate::commands::shared::verdict;
use crate::output::output;

/// Handle `wiz field`.
pub fn handle(
    args: &FieldArgs,
    service: &ValidationService,
    flags: &GlobalFlags,
) -> anyhow::Result<ExitCode> {
    let document = match &args.document {
        Some(path) => read_json(path)?,
        None => Value::Object(Map::new()),
    };
    let value = args.value.as_deref().map(parse_value);

    let result = service.validate_single_field(&args.source, &args.path, value.as_ref(), &document);
    output(&result, flags.format)?;
    Ok(verdict(result.is_valid))
}
