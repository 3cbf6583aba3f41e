//! `requestor schema` and `requestor export`.
//!
//! Print to stdout exactly what the matching endpoint would send to the AI
//! server with `peek: true`. Nothing is sent anywhere.

use requestor_core::ExportPayload;
use requestor_runtime::{collect_schema, export_data};
use std::path::Path;

/// Print the `ai_suggest` payload.
pub async fn schema(config_path: &Path) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let source = super::connect(&config).await?;

    let schema = collect_schema(&source, &config.catalog).await?;
    tracing::info!(
        tables = schema.len(),
        columns = schema.column_count(),
        "Collected schema"
    );

    print_payload(&ExportPayload::suggest(schema))
}

/// Print the `ai_query` payload for `prompt`.
pub async fn export(config_path: &Path, prompt: &str) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let source = super::connect(&config).await?;

    let schema = collect_schema(&source, &config.catalog).await?;
    let data = export_data(&source, &schema).await?;
    tracing::info!(
        tables = data.len(),
        records = data.iter().map(|t| t.data.len()).sum::<usize>(),
        "Exported data"
    );

    print_payload(&ExportPayload::query(prompt, data))
}

fn print_payload(payload: &ExportPayload) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}
