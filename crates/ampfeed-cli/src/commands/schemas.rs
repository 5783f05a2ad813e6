//! `ampfeed schemas` command implementation
//!
//! Lists the built-in advertiser schemas and their key properties.

use crate::error::Result;
use ampfeed_pipeline::catalog;
use colored::Colorize;

/// List built-in advertiser schemas
pub async fn run() -> Result<()> {
    println!("{}", "Built-in advertiser schemas:".bold());
    for name in catalog::BUILTIN_ADVERTISERS {
        if let Some(schema) = catalog::builtin(name) {
            println!(
                "  {:<16} delimiter={:<6} url_column={:<6} renames={:<3} id_columns={}",
                name.green(),
                schema.delimiter.to_string(),
                schema.url_column,
                schema.column_mapping.len(),
                schema.id_columns.join(", "),
            );
        }
    }
    Ok(())
}
