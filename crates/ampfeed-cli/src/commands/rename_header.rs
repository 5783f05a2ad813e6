//! `ampfeed rename-header` command implementation
//!
//! Post-hoc column rename over an already-compressed output: used when a
//! parallel write phase emitted raw column names and renaming was deferred.

use crate::commands::resolve_schema;
use crate::error::{CliError, Result};
use ampfeed_common::types::{output_file_name, OutputVariant};
use ampfeed_pipeline::rewrite::rewrite_header;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Rewrite the header of an existing compressed feed file
pub async fn run(
    input: String,
    output: Option<String>,
    advertiser: Option<String>,
    schema_file: Option<String>,
) -> Result<()> {
    let schema = resolve_schema(advertiser.as_deref(), schema_file.as_deref())?;

    let input_path = PathBuf::from(&input);
    let output_path = match output {
        Some(o) => PathBuf::from(o),
        None => input_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(output_file_name(&schema.advertiser, OutputVariant::Updated)),
    };

    let shown_output = output_path.clone();
    tokio::task::spawn_blocking(move || rewrite_header(&input_path, &output_path, &schema))
        .await
        .map_err(|e| CliError::Other(anyhow::anyhow!("rewrite task failed: {}", e)))??;

    println!(
        "{} header renamed -> {}",
        "✓".green(),
        shown_output.display()
    );
    Ok(())
}
