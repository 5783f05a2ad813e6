//! `ampfeed run` command implementation
//!
//! Transforms one advertiser catalog into its normalized compressed output.

use crate::commands::resolve_schema;
use crate::error::{CliError, Result};
use ampfeed_common::types::{output_file_name, OutputVariant};
use ampfeed_pipeline::pipeline::default_workers;
use ampfeed_pipeline::{Delimiter, PipelineOptions};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Run one feed transformation
#[allow(clippy::too_many_arguments)]
pub async fn run(
    input: String,
    output: Option<String>,
    advertiser: Option<String>,
    schema_file: Option<String>,
    chunk_size: usize,
    workers: Option<usize>,
    delimiter: Option<String>,
    no_progress: bool,
) -> Result<()> {
    let schema = resolve_schema(advertiser.as_deref(), schema_file.as_deref())?;

    let delimiter = delimiter
        .map(|d| d.parse::<Delimiter>())
        .transpose()
        .map_err(|e| CliError::Other(anyhow::anyhow!(e)))?;

    let input_path = PathBuf::from(&input);
    let output_path = match output {
        Some(o) => PathBuf::from(o),
        None => input_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(output_file_name(&schema.advertiser, OutputVariant::Normalized)),
    };

    let opts = PipelineOptions {
        chunk_size,
        workers: workers.unwrap_or_else(default_workers),
        delimiter,
        progress: !no_progress,
    };

    let report = tokio::task::spawn_blocking(move || {
        ampfeed_pipeline::run(&input_path, &output_path, &schema, &opts)
    })
    .await
    .map_err(|e| CliError::Other(anyhow::anyhow!("pipeline task failed: {}", e)))??;

    println!(
        "{} {}: {} row(s) in {} chunk(s) -> {}",
        "✓".green(),
        report.advertiser,
        report.rows,
        report.chunks,
        report.output.display()
    );
    if report.encode_failures > 0 {
        println!(
            "  {} {} row(s) degraded to an empty tracking link",
            "!".yellow(),
            report.encode_failures
        );
    }

    Ok(())
}
