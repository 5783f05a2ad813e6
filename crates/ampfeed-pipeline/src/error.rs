//! Error types for feed pipeline runs
//!
//! The taxonomy follows the failure domains of a run: structural problems
//! with the source file abort that source's run (`ReadError`), a column-set
//! disagreement between chunks aborts the write with no valid output
//! (`SchemaDrift`), and a single row whose URL cannot be encoded only
//! degrades that row (`RowEncodingError`, recovered locally and never
//! propagated).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors raised while opening or scanning a source catalog file
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Cannot open source file '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record in '{path}': {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Required column '{column}' is absent from the header of '{path}'")]
    MissingColumn { path: PathBuf, column: String },
}

/// Top-level error type for a single source's pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source file missing, unreadable, or malformed. Fatal to this source.
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    /// A later chunk's column order disagrees with the established header.
    /// Fatal; the partially written output is discarded.
    #[error(
        "Schema drift in chunk {index}: expected columns [{}], got [{}]",
        .expected.join(", "),
        .found.join(", ")
    )]
    SchemaDrift {
        index: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Header rewrite invoked on a file with no header line.
    #[error("Empty file: no header line in '{0}'")]
    EmptyFile(PathBuf),

    /// Filesystem failure while writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A pipeline worker thread died without reporting a result.
    #[error("Worker pool failure: {0}")]
    Pool(String),
}

impl PipelineError {
    /// Create a worker pool error
    pub fn pool(msg: impl Into<String>) -> Self {
        Self::Pool(msg.into())
    }
}

/// A single row's URL value cannot be percent-encoded
///
/// Recovered at the row level: the offending field becomes an empty tracking
/// link and the row is otherwise preserved.
#[derive(Error, Debug)]
#[error("Cannot encode product URL ({reason}): {value:?}")]
pub struct RowEncodingError {
    pub value: String,
    pub reason: String,
}

impl RowEncodingError {
    pub fn new(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            reason: reason.into(),
        }
    }
}
