//! Build automation tasks for ampfeed
//!
//! This tool provides various automation tasks for the ampfeed project,
//! including:
//! - Generating CLI documentation from source code
//! - Future build-related tasks

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for ampfeed", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate CLI documentation in markdown format
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    // Generate markdown from clap definitions
    let markdown = clap_markdown::help_markdown::<ampfeed_cli::Cli>();

    let content = format!(
        r#"---
title: CLI Reference
description: Complete command reference for the ampfeed CLI
---

# Ampfeed CLI Reference

This documentation is auto-generated from the CLI source code. Last updated: {}.

## Overview

Ampfeed normalizes advertiser product catalogs into the compressed
tab-separated format consumed downstream, rewriting product links into
tracking links along the way.

## Quick Start

```bash
# Transform one catalog with a built-in advertiser schema
ampfeed run --input wayfair_data.csv --advertiser wayfair

# Process every feed in the manifest
ampfeed run-all --manifest feeds.yml

# Rename the header of an already-produced file
ampfeed rename-header --input amp_klarna_wayfair.tsv.gz --advertiser wayfair

# Inspect a produced file
ampfeed preview amp_klarna_wayfair.tsv.gz --rows 10
```

## Commands

{}

## Environment Variables

- `LOG_LEVEL` - Logging level (e.g., `debug`, `info`, `warn`, `error`)
- `LOG_OUTPUT` - Log target (`console`, `file`, `both`)
- `LOG_DIR` - Directory for rotated log files

## Manifest

`run-all` reads a `feeds.yml` manifest:

```yaml
feeds:
  - advertiser: wayfair
    input: /data/wayfair/{{date}}_wayfair_PLA.csv
    output_dir: /data/wayfair
```

---

*This documentation is automatically generated from the CLI source code. To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    // Create output directory if it doesn't exist
    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    // Write the markdown file
    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
