//! Pipeline orchestration
//!
//! Wires reader, transformer, and writer together: the calling thread feeds
//! chunks into a bounded channel, a fixed pool of worker threads transforms
//! them independently, and a collector thread owning the single writer
//! reassembles results in chunk-index order before appending. Order
//! preservation is enforced by the reorder buffer, not assumed from
//! submission order; bounded channels give backpressure so a saturated pool
//! blocks the feeder instead of queuing unboundedly.

use crate::chunk::Chunk;
use crate::error::{PipelineError, Result};
use crate::reader::{ChunkedReader, DEFAULT_CHUNK_SIZE};
use crate::schema::{Delimiter, SourceSchema};
use crate::transform::{transform_chunk, TransformedChunk};
use crate::writer::CompressedWriter;
use crossbeam_channel::bounded;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

/// Tuning knobs for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Rows per chunk
    pub chunk_size: usize,

    /// Worker threads transforming chunks
    pub workers: usize,

    /// Override the schema's input delimiter
    pub delimiter: Option<Delimiter>,

    /// Show a progress indicator on the console
    pub progress: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: default_workers(),
            delimiter: None,
            progress: false,
        }
    }
}

/// Default pool size: all cores minus a small reserve, at least two
pub fn default_workers() -> usize {
    num_cpus::get().saturating_sub(2).max(2)
}

/// Summary of one source's completed run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub advertiser: String,
    pub output: PathBuf,
    pub rows: u64,
    pub chunks: usize,
    /// Rows degraded to an empty tracking link
    pub encode_failures: u64,
}

/// One source feed to process in a multi-source run
#[derive(Debug, Clone)]
pub struct FeedJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub schema: SourceSchema,
}

/// Per-source outcome of a multi-source run
#[derive(Debug)]
pub struct SourceOutcome {
    pub advertiser: String,
    pub result: Result<PipelineReport>,
}

/// Transform one source feed into its normalized compressed output
pub fn run(
    input: &Path,
    output: &Path,
    schema: &SourceSchema,
    opts: &PipelineOptions,
) -> Result<PipelineReport> {
    let delimiter = opts.delimiter.unwrap_or(schema.delimiter).as_byte();
    let workers = opts.workers.max(1);

    let mut reader = ChunkedReader::open(input, delimiter, opts.chunk_size.max(1))?;
    reader.require_columns(&[schema.url_column.as_str()])?;
    let source_columns = Arc::new(reader.columns().to_vec());

    let writer = CompressedWriter::create(output)?;
    let progress = row_progress(opts.progress, &schema.advertiser);

    info!(
        advertiser = %schema.advertiser,
        input = %input.display(),
        workers,
        chunk_size = opts.chunk_size,
        "pipeline run starting"
    );

    let (work_tx, work_rx) = bounded::<Chunk>(workers * 2);
    let (done_tx, done_rx) = bounded::<(usize, TransformedChunk)>(workers * 2);

    let (read_outcome, collect_outcome) = thread::scope(|s| {
        for _ in 0..workers {
            let work_rx = work_rx.clone();
            let done_tx = done_tx.clone();
            s.spawn(move || {
                for chunk in work_rx.iter() {
                    let index = chunk.index;
                    let transformed = transform_chunk(chunk, schema);
                    if done_tx.send((index, transformed)).is_err() {
                        // Collector is gone; the run is aborting.
                        break;
                    }
                }
            });
        }
        drop(work_rx);
        drop(done_tx);

        let collector_progress = progress.clone();
        let collector = s.spawn(move || -> Result<(CompressedWriter, u64)> {
            let mut writer = writer;
            let mut pending: BTreeMap<usize, TransformedChunk> = BTreeMap::new();
            let mut next_index = 0usize;
            let mut encode_failures = 0u64;

            for (index, transformed) in done_rx.iter() {
                pending.insert(index, transformed);
                // Release only the contiguous prefix: chunk k is written
                // strictly after chunk k-1 has been flushed.
                while let Some(ready) = pending.remove(&next_index) {
                    encode_failures += ready.encode_failures;
                    writer.write_chunk(&ready.chunk)?;
                    collector_progress.inc(ready.chunk.len() as u64);
                    next_index += 1;
                }
            }

            if !pending.is_empty() {
                return Err(PipelineError::pool(format!(
                    "{} transformed chunk(s) never became writable",
                    pending.len()
                )));
            }
            Ok((writer, encode_failures))
        });

        // Feed chunks from the calling thread; a full pool blocks here.
        let mut read_outcome: Result<usize> = Ok(0);
        let mut chunks_read = 0usize;
        for item in &mut reader {
            match item {
                Ok(chunk) => {
                    chunks_read += 1;
                    if work_tx.send(chunk).is_err() {
                        break;
                    }
                },
                Err(e) => {
                    read_outcome = Err(e.into());
                    break;
                },
            }
        }
        if read_outcome.is_ok() {
            read_outcome = Ok(chunks_read);
        }
        drop(work_tx);

        let collect_outcome = collector
            .join()
            .unwrap_or_else(|_| Err(PipelineError::pool("collector thread panicked")));
        (read_outcome, collect_outcome)
    });

    let chunks = read_outcome?;
    let (mut writer, encode_failures) = collect_outcome?;

    if chunks == 0 {
        // Header-only source: still emit the renamed header.
        let empty = transform_chunk(Chunk::new(0, source_columns, Vec::new()), schema);
        writer.write_chunk(&empty.chunk)?;
    }

    let rows = writer.finish()?;
    progress.finish_and_clear();

    info!(
        advertiser = %schema.advertiser,
        output = %output.display(),
        rows,
        chunks,
        encode_failures,
        "pipeline run complete"
    );

    Ok(PipelineReport {
        advertiser: schema.advertiser.clone(),
        output: output.to_owned(),
        rows,
        chunks,
        encode_failures,
    })
}

/// Process several source feeds, isolating failures per source
///
/// One source's structural failure never rolls back or blocks the others;
/// each outcome is reported independently.
pub fn run_many(jobs: &[FeedJob], opts: &PipelineOptions) -> Vec<SourceOutcome> {
    jobs.iter()
        .map(|job| {
            let advertiser = job.schema.advertiser.clone();
            let result = run(&job.input, &job.output, &job.schema, opts);
            match &result {
                Ok(report) => {
                    info!(advertiser = %advertiser, rows = report.rows, "source succeeded");
                },
                Err(e) => {
                    error!(advertiser = %advertiser, error = %e, "source failed");
                },
            }
            SourceOutcome { advertiser, result }
        })
        .collect()
}

/// Row-count progress indicator (hidden unless enabled)
fn row_progress(enabled: bool, advertiser: &str) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}: {pos} rows [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(advertiser.to_string());
    pb
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_workers_floor() {
        assert!(default_workers() >= 2);
    }

    #[test]
    fn test_options_defaults() {
        let opts = PipelineOptions::default();
        assert_eq!(opts.chunk_size, DEFAULT_CHUNK_SIZE);
        assert!(opts.delimiter.is_none());
        assert!(!opts.progress);
    }
}
