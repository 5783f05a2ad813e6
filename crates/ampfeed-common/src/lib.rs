//! Ampfeed Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the ampfeed workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all ampfeed workspace
//! members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: Centralized tracing configuration and initialization
//! - **Types**: Feed naming conventions and dated file-name patterns
//!
//! # Example
//!
//! ```no_run
//! use ampfeed_common::logging::{init_logging, LogConfig};
//! use tracing::info;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     info!("feed run starting");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{AmpError, Result};
