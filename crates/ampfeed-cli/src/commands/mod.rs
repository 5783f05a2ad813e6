//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod preview;
pub mod rename_header;
pub mod run;
pub mod run_all;
pub mod schemas;

use crate::error::{CliError, Result};
use crate::manifest::load_schema_file;
use ampfeed_pipeline::{catalog, SourceSchema};

/// Resolve the schema for a command from `--advertiser` or `--schema`
pub(crate) fn resolve_schema(
    advertiser: Option<&str>,
    schema_file: Option<&str>,
) -> Result<SourceSchema> {
    match (advertiser, schema_file) {
        (_, Some(file)) => load_schema_file(file),
        (Some(name), None) => {
            catalog::builtin(name).ok_or_else(|| CliError::UnknownAdvertiser(name.to_string()))
        },
        (None, None) => Err(CliError::NoSchema),
    }
}
