//! Feed manifest handling (feeds.yml)
//!
//! The manifest lists the feeds a `run-all` invocation processes: which
//! advertiser schema to use, where the partner drops the input file, and
//! where the normalized output goes. Input names may carry a `{date}`
//! placeholder expanded to today's `YYYYMMDD` (partner drops are dated).
//!
//! Example:
//!
//! ```yaml
//! feeds:
//!   - advertiser: wayfair
//!     input: /data/wayfair/{date}_wayfair_PLA.csv
//!     output_dir: /data/wayfair
//!   - advertiser: zappos
//!     input: /data/zappos/zappos_admarketplace.txt.gz
//!     output_dir: /data/zappos
//!     updated_naming: true
//!   - advertiser: acme
//!     schema: ./schemas/acme.yml
//!     input: /data/acme/acme_feed.csv
//!     output_dir: /data/acme
//! ```

use crate::error::{CliError, Result};
use ampfeed_common::types::{expand_file_pattern_today, output_file_name, OutputVariant};
use ampfeed_pipeline::{catalog, FeedJob, SourceSchema};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Feed manifest file (feeds.yml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedManifest {
    /// Feeds to process, in order
    pub feeds: Vec<FeedEntry>,
}

/// One feed in the manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedEntry {
    /// Advertiser name; resolves a built-in schema unless `schema` is set
    pub advertiser: String,

    /// Input file path; `{date}` expands to today's YYYYMMDD
    pub input: String,

    /// Directory the output file is written into
    pub output_dir: PathBuf,

    /// Optional custom schema file (YAML `SourceSchema`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<PathBuf>,

    /// Use the `_updated` output naming variant
    #[serde(default)]
    pub updated_naming: bool,
}

impl FeedManifest {
    /// Load a manifest from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let manifest: FeedManifest = serde_yaml::from_str(&content)
            .map_err(|e| CliError::invalid_manifest(e.to_string()))?;

        if manifest.feeds.is_empty() {
            return Err(CliError::invalid_manifest("manifest lists no feeds"));
        }
        Ok(manifest)
    }

    /// Save the manifest to a YAML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve every entry into a runnable job
    pub fn resolve_jobs(&self) -> Result<Vec<FeedJob>> {
        self.feeds.iter().map(resolve_entry).collect()
    }
}

/// Resolve one manifest entry: schema lookup, date expansion, output naming
fn resolve_entry(entry: &FeedEntry) -> Result<FeedJob> {
    let schema = match &entry.schema {
        Some(path) => load_schema_file(path)?,
        None => catalog::builtin(&entry.advertiser)
            .ok_or_else(|| CliError::UnknownAdvertiser(entry.advertiser.clone()))?,
    };

    let variant = if entry.updated_naming {
        OutputVariant::Updated
    } else {
        OutputVariant::Normalized
    };

    let input = PathBuf::from(expand_file_pattern_today(&entry.input));
    let output = entry
        .output_dir
        .join(output_file_name(&schema.advertiser, variant));

    Ok(FeedJob {
        input,
        output,
        schema,
    })
}

/// Load a `SourceSchema` from a YAML file
pub fn load_schema_file(path: impl AsRef<Path>) -> Result<SourceSchema> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&content)
        .map_err(|e| CliError::invalid_schema(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    const MANIFEST: &str = r#"
feeds:
  - advertiser: wayfair
    input: /data/wayfair/wayfair_data.csv
    output_dir: /data/wayfair
  - advertiser: zappos
    input: /data/zappos/zappos_admarketplace.txt.gz
    output_dir: /data/zappos
    updated_naming: true
"#;

    #[test]
    fn test_load_and_resolve() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();
        file.flush().unwrap();

        let manifest = FeedManifest::load(file.path()).unwrap();
        assert_eq!(manifest.feeds.len(), 2);

        let jobs = manifest.resolve_jobs().unwrap();
        assert_eq!(jobs[0].schema.advertiser, "wayfair");
        assert_eq!(
            jobs[0].output,
            PathBuf::from("/data/wayfair/amp_klarna_wayfair.tsv.gz")
        );
        assert_eq!(
            jobs[1].output,
            PathBuf::from("/data/zappos/amp_klarna_zappos_updated.tsv.gz")
        );
    }

    #[test]
    fn test_unknown_advertiser_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"feeds:\n  - advertiser: nobody\n    input: /x.csv\n    output_dir: /x\n",
        )
        .unwrap();
        file.flush().unwrap();

        let manifest = FeedManifest::load(file.path()).unwrap();
        let err = manifest.resolve_jobs().unwrap_err();
        assert!(matches!(err, CliError::UnknownAdvertiser(name) if name == "nobody"));
    }

    #[test]
    fn test_missing_manifest_file() {
        let err = FeedManifest::load("/no/such/feeds.yml").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_empty_manifest_is_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"feeds: []\n").unwrap();
        file.flush().unwrap();

        let err = FeedManifest::load(file.path()).unwrap_err();
        assert!(matches!(err, CliError::InvalidManifest(_)));
    }

    #[test]
    fn test_custom_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let schema_path = dir.path().join("acme.yml");
        let schema = SourceSchema::new(
            "acme",
            "link",
            ampfeed_pipeline::link::TrackingTemplate::new("https://t.example/?c=1"),
        );
        std::fs::write(&schema_path, serde_yaml::to_string(&schema).unwrap()).unwrap();

        let loaded = load_schema_file(&schema_path).unwrap();
        assert_eq!(loaded, schema);
    }
}
