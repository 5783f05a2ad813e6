//! Ampfeed Pipeline Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Streaming normalization of partner product catalogs into the
//! tab-separated, gzip-compressed format the ad-serving side consumes.
//!
//! A run is a linear pipeline per source feed:
//!
//! 1. **Chunked reader** — walks a delimited catalog file (plain or gzipped)
//!    in bounded row batches, keeping every value as a raw string.
//! 2. **Row transformer** — pure per-chunk function: scrubs quoting
//!    artifacts, rewrites product links into tracking links, renames columns
//!    per the advertiser's [`SourceSchema`], normalizes identifier columns,
//!    and backfills required-but-missing columns.
//! 3. **Compressed writer** — appends transformed chunks to a single gzip
//!    TSV stream, header written exactly once, column order enforced.
//!
//! Chunks are transformed on a fixed worker pool; an indexed reorder buffer
//! in front of the writer keeps output rows in original file order no matter
//! which worker finishes first.
//!
//! # Example
//!
//! ```no_run
//! use ampfeed_pipeline::{catalog, run, PipelineOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ampfeed_pipeline::PipelineError> {
//!     let schema = catalog::wayfair();
//!     let report = run(
//!         Path::new("wayfair_data.csv"),
//!         Path::new("amp_klarna_wayfair.tsv.gz"),
//!         &schema,
//!         &PipelineOptions::default(),
//!     )?;
//!     println!("wrote {} rows", report.rows);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod chunk;
pub mod error;
pub mod link;
pub mod pipeline;
pub mod reader;
pub mod rewrite;
pub mod schema;
pub mod transform;
pub mod writer;

// Re-export commonly used types
pub use chunk::Chunk;
pub use error::{PipelineError, ReadError, Result, RowEncodingError};
pub use pipeline::{run, run_many, FeedJob, PipelineOptions, PipelineReport, SourceOutcome};
pub use schema::{ColumnRename, Delimiter, SourceSchema};
