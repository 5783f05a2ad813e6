//! Error types for the ampfeed CLI
//!
//! User-facing errors with clear, actionable messages.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Comprehensive error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Required file is missing
    #[error("File not found: '{0}'. Verify the file path exists and you have read permissions.")]
    FileNotFound(String),

    /// Feed manifest (feeds.yml) has invalid format or content
    #[error("Invalid manifest: {0}. Check the feeds.yml syntax and field names.")]
    InvalidManifest(String),

    /// Advertiser has no built-in schema
    #[error("Unknown advertiser '{0}'. Run 'ampfeed schemas' to list built-in schemas, or pass --schema with a schema file.")]
    UnknownAdvertiser(String),

    /// No schema source was given
    #[error("No schema specified. Pass --advertiser <name> or --schema <file>.")]
    NoSchema,

    /// Schema file has invalid format or content
    #[error("Invalid schema file '{file}': {message}")]
    InvalidSchema { file: String, message: String },

    /// One or more sources in a manifest run failed
    #[error("{failed} of {total} feed(s) failed. See the log for per-source errors.")]
    SourcesFailed { failed: usize, total: usize },

    /// Pipeline run failed
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] ampfeed_pipeline::PipelineError),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// YAML parsing failed
    #[error("Failed to parse YAML: {0}. Check the file syntax at the indicated line/column.")]
    YamlParse(#[from] serde_yaml::Error),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create an invalid manifest error
    pub fn invalid_manifest(msg: impl Into<String>) -> Self {
        Self::InvalidManifest(msg.into())
    }

    /// Create an invalid schema file error
    pub fn invalid_schema(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            file: file.into(),
            message: message.into(),
        }
    }
}
