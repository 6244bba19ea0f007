use std::process::ExitCode;

use serde::Serialize;
use wiz_core::SourceId;
use wiz_schema::ValidationService;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SourceSummary {
    source: SourceId,
    fields: Vec<String>,
}

/// Handle `wiz sources`.
pub fn handle(service: &ValidationService, flags: &GlobalFlags) -> anyhow::Result<ExitCode> {
    let registry = service.registry();
    let mut summaries = Vec::with_capacity(registry.schema_count());
    for source in registry.sources() {
        let schema = registry.get(source.as_str())?;
        let fields: Vec<String> = schema
            .as_object()
            .map(|object| object.fields.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default();
        summaries.push(SourceSummary { source, fields });
    }
    output(&summaries, flags.format)?;
    Ok(ExitCode::SUCCESS)
}
