//! `ampfeed run-all` command implementation
//!
//! Processes every feed in the manifest, isolating failures per source: a
//! broken feed is reported and the remaining feeds still run.

use crate::error::{CliError, Result};
use crate::manifest::FeedManifest;
use ampfeed_pipeline::pipeline::default_workers;
use ampfeed_pipeline::{run_many, PipelineOptions};
use colored::Colorize;

/// Run every feed in the manifest
pub async fn run(
    manifest_path: String,
    chunk_size: usize,
    workers: Option<usize>,
    no_progress: bool,
) -> Result<()> {
    let manifest = FeedManifest::load(&manifest_path)?;
    let jobs = manifest.resolve_jobs()?;
    let total = jobs.len();

    let opts = PipelineOptions {
        chunk_size,
        workers: workers.unwrap_or_else(default_workers),
        delimiter: None,
        progress: !no_progress,
    };

    let outcomes = tokio::task::spawn_blocking(move || run_many(&jobs, &opts))
        .await
        .map_err(|e| CliError::Other(anyhow::anyhow!("pipeline task failed: {}", e)))?;

    let mut failed = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => {
                println!(
                    "{} {}: {} row(s) -> {}",
                    "✓".green(),
                    outcome.advertiser,
                    report.rows,
                    report.output.display()
                );
            },
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", "✗".red(), outcome.advertiser, e);
            },
        }
    }

    if failed > 0 {
        return Err(CliError::SourcesFailed { failed, total });
    }
    Ok(())
}
