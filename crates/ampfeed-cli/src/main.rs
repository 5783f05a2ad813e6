//! Ampfeed CLI - Main entry point

use ampfeed_cli::{Cli, Commands};
use ampfeed_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use clap::Parser;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Handle markdown help generation
    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    // Ensure a command is provided
    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    // Initialize logging based on verbose flag and environment
    let log_config = if cli.verbose {
        // Verbose mode: log to console with debug level
        LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::Console)
            .log_file_prefix("ampfeed".to_string())
            .build()
    } else {
        // Normal mode: only warnings and errors to console
        LogConfig::builder()
            .level(LogLevel::Warn)
            .output(LogOutput::Console)
            .log_file_prefix("ampfeed".to_string())
            .build()
    };

    // Merge with environment variables (they take precedence)
    let log_config = LogConfig::from_env().unwrap_or(log_config);

    // Initialize logging (ignore errors as the CLI works without logging)
    let _ = init_logging(&log_config);

    // Execute command
    let result = execute_command(cli).await;

    // Handle result
    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: Cli) -> ampfeed_cli::Result<()> {
    // Command is guaranteed to exist at this point (checked in main)
    let Some(command) = cli.command else {
        unreachable!("Command should have been validated in main");
    };

    match command {
        Commands::Run {
            input,
            output,
            advertiser,
            schema,
            chunk_size,
            workers,
            delimiter,
            no_progress,
        } => {
            ampfeed_cli::commands::run::run(
                input, output, advertiser, schema, chunk_size, workers, delimiter, no_progress,
            )
            .await
        }

        Commands::RunAll {
            manifest,
            chunk_size,
            workers,
            no_progress,
        } => ampfeed_cli::commands::run_all::run(manifest, chunk_size, workers, no_progress).await,

        Commands::RenameHeader {
            input,
            output,
            advertiser,
            schema,
        } => ampfeed_cli::commands::rename_header::run(input, output, advertiser, schema).await,

        Commands::Preview { input, rows } => {
            ampfeed_cli::commands::preview::run(input, rows).await
        }

        Commands::Schemas => ampfeed_cli::commands::schemas::run().await,
    }
}
