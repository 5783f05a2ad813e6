//! Per-advertiser source schemas
//!
//! A [`SourceSchema`] is the single configuration value that drives a feed's
//! transformation: column renames, the URL-bearing column, the tracking-URL
//! template, identifier columns needing numeric-string normalization, and
//! the output columns the advertiser schema requires even when the source
//! lacks them. Onboarding a new advertiser means writing a new schema value
//! (in code or in the YAML feed manifest), not new code.

use crate::link::TrackingTemplate;
use serde::{Deserialize, Serialize};

/// Output columns every advertiser feed must carry
///
/// Sources missing any of these get the column appended with empty values.
pub const REQUIRED_OUTPUT_COLUMNS: &[&str] = &[
    "AdultContent",
    "Delivery time",
    "Bundled",
    "EnergyEfficiencyClass",
    "Multipack",
    "SizeSystem",
];

/// Input field delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// Comma-separated input
    #[default]
    Comma,
    /// Tab-separated input
    Tab,
}

impl Delimiter {
    /// The delimiter as a single byte, as the CSV reader expects it
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

impl std::str::FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comma" | "," => Ok(Delimiter::Comma),
            "tab" | "\t" | "\\t" => Ok(Delimiter::Tab),
            _ => Err(format!("Invalid delimiter: {} (expected comma or tab)", s)),
        }
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Tab => write!(f, "tab"),
        }
    }
}

/// One raw-column-to-canonical-column rename
///
/// Kept as an explicit ordered list (not a map) so the schema declaration
/// order is preserved through YAML round trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    /// Raw column name as it appears in the source header
    pub from: String,

    /// Canonical output column name
    pub to: String,
}

impl ColumnRename {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Per-advertiser feed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSchema {
    /// Advertiser identifier, lowercase (drives output file naming)
    pub advertiser: String,

    /// Input field delimiter
    #[serde(default)]
    pub delimiter: Delimiter,

    /// Raw name of the column holding the product URL
    pub url_column: String,

    /// Base tracking-URL template the encoded product URL is embedded into
    pub tracking: TrackingTemplate,

    /// Ordered raw-to-canonical column renames; unmapped columns pass
    /// through unchanged
    #[serde(default)]
    pub column_mapping: Vec<ColumnRename>,

    /// Canonical names of identifier columns needing numeric-string
    /// normalization (e.g. "123.0" -> "123")
    #[serde(default)]
    pub id_columns: Vec<String>,

    /// Output columns backfilled with empty values when the source lacks
    /// them
    #[serde(default = "default_required_columns")]
    pub required_columns: Vec<String>,
}

fn default_required_columns() -> Vec<String> {
    REQUIRED_OUTPUT_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .collect()
}

impl SourceSchema {
    /// Create a schema with no renames and the default required columns
    pub fn new(
        advertiser: impl Into<String>,
        url_column: impl Into<String>,
        tracking: TrackingTemplate,
    ) -> Self {
        Self {
            advertiser: advertiser.into(),
            delimiter: Delimiter::default(),
            url_column: url_column.into(),
            tracking,
            column_mapping: Vec::new(),
            id_columns: Vec::new(),
            required_columns: default_required_columns(),
        }
    }

    /// Set the input delimiter
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the column mapping from `(from, to)` pairs
    pub fn with_mapping(mut self, pairs: &[(&str, &str)]) -> Self {
        self.column_mapping = pairs
            .iter()
            .map(|(from, to)| ColumnRename::new(*from, *to))
            .collect();
        self
    }

    /// Set the identifier columns (canonical names)
    pub fn with_id_columns(mut self, columns: &[&str]) -> Self {
        self.id_columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Canonical name for a raw column, if the mapping covers it
    pub fn rename<'a>(&'a self, raw: &str) -> Option<&'a str> {
        self.column_mapping
            .iter()
            .find(|r| r.from == raw)
            .map(|r| r.to.as_str())
    }

    /// Canonical output name for a raw column (identity when unmapped)
    pub fn output_name<'a>(&'a self, raw: &'a str) -> &'a str {
        self.rename(raw).unwrap_or(raw)
    }
}
