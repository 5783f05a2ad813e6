//! Ampfeed CLI Library
//!
//! Command-line interface for running advertiser feed normalization.
//!
//! # Overview
//!
//! - **Single feed runs**: transform one catalog file (`ampfeed run`)
//! - **Manifest runs**: process every feed in `feeds.yml` (`ampfeed run-all`)
//! - **Header rewrite**: rename columns of an existing output
//!   (`ampfeed rename-header`)
//! - **Inspection**: dump the first rows of a produced file
//!   (`ampfeed preview`), list built-in schemas (`ampfeed schemas`)

pub mod commands;
pub mod error;
pub mod manifest;

// Re-export commonly used types
pub use error::{CliError, Result};
pub use manifest::FeedManifest;

use clap::{Parser, Subcommand};

/// Ampfeed - advertiser catalog normalization pipeline
#[derive(Parser, Debug)]
#[command(name = "ampfeed")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print CLI documentation as markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform one advertiser catalog into its normalized output
    Run {
        /// Source catalog file (.csv, .tsv, optionally .gz)
        #[arg(short, long)]
        input: String,

        /// Output file (defaults to amp_klarna_<advertiser>.tsv.gz next to
        /// the input)
        #[arg(short, long)]
        output: Option<String>,

        /// Built-in advertiser schema to use
        #[arg(short, long)]
        advertiser: Option<String>,

        /// Custom schema file (YAML) instead of a built-in advertiser
        #[arg(long, conflicts_with = "advertiser")]
        schema: Option<String>,

        /// Rows per chunk
        #[arg(long, default_value_t = ampfeed_pipeline::reader::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Worker threads (defaults to cores minus two)
        #[arg(long)]
        workers: Option<usize>,

        /// Override the schema's input delimiter (comma or tab)
        #[arg(long)]
        delimiter: Option<String>,

        /// Disable the progress indicator
        #[arg(long)]
        no_progress: bool,
    },

    /// Process every feed listed in a YAML manifest
    RunAll {
        /// Manifest file
        #[arg(short, long, default_value = "feeds.yml")]
        manifest: String,

        /// Rows per chunk
        #[arg(long, default_value_t = ampfeed_pipeline::reader::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Worker threads (defaults to cores minus two)
        #[arg(long)]
        workers: Option<usize>,

        /// Disable the progress indicator
        #[arg(long)]
        no_progress: bool,
    },

    /// Rewrite the header line of an existing compressed output
    RenameHeader {
        /// Existing .tsv.gz file with raw column names
        #[arg(short, long)]
        input: String,

        /// Output file (defaults to amp_klarna_<advertiser>_updated.tsv.gz
        /// next to the input)
        #[arg(short, long)]
        output: Option<String>,

        /// Built-in advertiser schema to use
        #[arg(short, long)]
        advertiser: Option<String>,

        /// Custom schema file (YAML) instead of a built-in advertiser
        #[arg(long, conflicts_with = "advertiser")]
        schema: Option<String>,
    },

    /// Print the first rows of a produced feed file
    Preview {
        /// Feed file (.tsv or .tsv.gz)
        input: String,

        /// Number of rows to print (header included)
        #[arg(short, long, default_value = "30")]
        rows: usize,
    },

    /// List built-in advertiser schemas
    Schemas,
}
