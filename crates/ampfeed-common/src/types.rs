//! Feed naming conventions shared by the pipeline and the CLI
//!
//! Delivery expects output files named `amp_klarna_<advertiser>.tsv.gz`, or
//! `amp_klarna_<advertiser>_updated.tsv.gz` when the header rename happens in
//! a separate post-hoc pass. Partner drops use per-advertiser file-name
//! patterns where `{date}` stands for the current day as `YYYYMMDD`.

use chrono::{Local, NaiveDate};

/// Output file name prefix required by the downstream pickup job
pub const OUTPUT_PREFIX: &str = "amp_klarna_";

/// Which naming variant an output file uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputVariant {
    /// Renaming applied in the same pass: `amp_klarna_<advertiser>.tsv.gz`
    #[default]
    Normalized,
    /// Header rename deferred to a post-hoc pass:
    /// `amp_klarna_<advertiser>_updated.tsv.gz`
    Updated,
}

/// Build the canonical output file name for an advertiser
pub fn output_file_name(advertiser: &str, variant: OutputVariant) -> String {
    match variant {
        OutputVariant::Normalized => format!("{}{}.tsv.gz", OUTPUT_PREFIX, advertiser),
        OutputVariant::Updated => format!("{}{}_updated.tsv.gz", OUTPUT_PREFIX, advertiser),
    }
}

/// Expand a `{date}` placeholder in a partner file-name pattern
///
/// Patterns without the placeholder are returned unchanged (static file
/// names such as `verizon_devices_admarketplace.csv`).
pub fn expand_file_pattern(pattern: &str, date: NaiveDate) -> String {
    pattern.replace("{date}", &date.format("%Y%m%d").to_string())
}

/// Expand a `{date}` placeholder using today's local date
pub fn expand_file_pattern_today(pattern: &str) -> String {
    expand_file_pattern(pattern, Local::now().date_naive())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(
            output_file_name("wayfair", OutputVariant::Normalized),
            "amp_klarna_wayfair.tsv.gz"
        );
        assert_eq!(
            output_file_name("wayfair", OutputVariant::Updated),
            "amp_klarna_wayfair_updated.tsv.gz"
        );
    }

    #[test]
    fn test_expand_file_pattern() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 17).unwrap();
        assert_eq!(
            expand_file_pattern("{date}_Bloomingdales_PLA.csv", date),
            "20241017_Bloomingdales_PLA.csv"
        );
        assert_eq!(
            expand_file_pattern("verizon_devices_admarketplace.csv", date),
            "verizon_devices_admarketplace.csv"
        );
    }
}
