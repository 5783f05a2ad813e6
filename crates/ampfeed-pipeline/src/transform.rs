//! Per-chunk row transformation
//!
//! Pure function over a chunk: the output is fully determined by the input
//! chunk and the advertiser schema. Steps, in order:
//!
//! 1. Scrub quote literals (and TSV-framing bytes) from every field.
//! 2. Rewrite the URL column into a tracking link.
//! 3. Rename columns per the schema mapping; unmapped columns keep their
//!    original names and positions.
//! 4. Normalize declared identifier columns ("123.0" -> "123").
//! 5. Append required-but-missing output columns with empty values.
//!
//! A row whose URL cannot be encoded degrades to an empty tracking link and
//! is counted; one bad row never aborts a chunk.

use crate::chunk::Chunk;
use crate::schema::SourceSchema;
use std::sync::Arc;
use tracing::warn;

/// A transformed chunk plus per-chunk recovery stats
#[derive(Debug)]
pub struct TransformedChunk {
    pub chunk: Chunk,
    /// Rows whose URL field was degraded to an empty tracking link
    pub encode_failures: u64,
}

/// Apply the schema-driven transform to one chunk
pub fn transform_chunk(chunk: Chunk, schema: &SourceSchema) -> TransformedChunk {
    let url_idx = chunk
        .columns
        .iter()
        .position(|c| c == &schema.url_column);

    // Renamed header, then required columns the source lacks, appended in
    // schema declaration order.
    let mut columns: Vec<String> = chunk
        .columns
        .iter()
        .map(|c| schema.output_name(c).to_string())
        .collect();
    let missing: Vec<String> = schema
        .required_columns
        .iter()
        .filter(|rc| !columns.iter().any(|c| &c == rc))
        .cloned()
        .collect();
    columns.extend(missing.iter().cloned());

    // Identifier columns are declared by canonical (post-rename) name.
    // Backfilled columns hold empty strings, so only source columns are
    // candidates.
    let source_width = chunk.columns.len();
    let id_idxs: Vec<usize> = schema
        .id_columns
        .iter()
        .filter_map(|id| columns[..source_width].iter().position(|c| c == id))
        .collect();

    let mut encode_failures = 0u64;
    let rows: Vec<Vec<String>> = chunk
        .rows
        .into_iter()
        .map(|row| {
            let mut row: Vec<String> = row.into_iter().map(|f| clean_field(&f)).collect();

            if let Some(i) = url_idx {
                match schema.tracking.rewrite(&row[i]) {
                    Ok(link) => row[i] = link,
                    Err(err) => {
                        warn!(error = %err, advertiser = %schema.advertiser, "degrading row to empty tracking link");
                        row[i] = schema.tracking.empty_link();
                        encode_failures += 1;
                    },
                }
            }

            for &i in &id_idxs {
                if let Some(normalized) = normalize_identifier(&row[i]) {
                    row[i] = normalized;
                }
            }

            row.extend(missing.iter().map(|_| String::new()));
            row
        })
        .collect();

    TransformedChunk {
        chunk: Chunk::new(chunk.index, Arc::new(columns), rows),
        encode_failures,
    }
}

/// Strip quote literals left behind by malformed upstream quoting, and the
/// bytes that would break tab-separated framing
fn clean_field(value: &str) -> String {
    if !value
        .chars()
        .any(|c| c == '"' || c == '\t' || c == '\n' || c == '\r')
    {
        return value.to_string();
    }
    value
        .chars()
        .filter(|&c| c != '"')
        .map(|c| if c == '\t' || c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

/// Exact integer range of f64; identifiers beyond this cannot be rewritten
/// without risking digit corruption
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0; // 2^53

/// Rewrite "123.0"-style identifiers as "123"
///
/// Only values containing a decimal point with a zero fractional part are
/// touched, so zero-padded identifiers ("00123") and anything non-numeric
/// pass through untouched. Returns `None` when the value is left as-is.
fn normalize_identifier(value: &str) -> Option<String> {
    if !value.contains('.') {
        return None;
    }
    let parsed: f64 = value.parse().ok()?;
    if !parsed.is_finite() || parsed.fract() != 0.0 || parsed.abs() > MAX_EXACT_INT {
        return None;
    }
    Some(format!("{}", parsed as i64))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::link::TrackingTemplate;

    fn schema() -> SourceSchema {
        SourceSchema::new(
            "acme",
            "link",
            TrackingTemplate::new("https://t.example/?ctaid=9"),
        )
        .with_mapping(&[
            ("id", "SKU/id"),
            ("link", "URL"),
            ("title", "Name"),
            ("gtin", "EAN/GTIN"),
        ])
        .with_id_columns(&["SKU/id", "EAN/GTIN"])
    }

    fn chunk(columns: &[&str], rows: &[&[&str]]) -> Chunk {
        Chunk::new(
            0,
            Arc::new(columns.iter().map(|c| c.to_string()).collect()),
            rows.iter()
                .map(|r| r.iter().map(|f| f.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_columns_renamed_in_place_with_backfill_appended() {
        let input = chunk(&["id", "title", "link", "extra"], &[&["1", "x", "u", "e"]]);
        let out = transform_chunk(input, &schema()).chunk;

        let mut expected = vec!["SKU/id", "Name", "URL", "extra"];
        expected.extend_from_slice(&[
            "AdultContent",
            "Delivery time",
            "Bundled",
            "EnergyEfficiencyClass",
            "Multipack",
            "SizeSystem",
        ]);
        assert_eq!(out.columns.as_slice(), expected.as_slice());
        // Backfilled values are empty strings
        assert_eq!(out.rows[0].len(), expected.len());
        assert!(out.rows[0][4..].iter().all(String::is_empty));
    }

    #[test]
    fn test_url_rewritten_with_query_discarded() {
        let input = chunk(&["link"], &[&["https://example.com/item?x=1"]]);
        let out = transform_chunk(input, &schema()).chunk;
        let url = &out.rows[0][0];
        assert!(url.starts_with("https://t.example/?ctaid=9&cu="));
        assert!(url.contains("https%3A%2F%2Fexample.com%2Fitem"));
        assert!(!url.contains("x=1"));
    }

    #[test]
    fn test_unencodable_url_degrades_row_only() {
        let input = chunk(
            &["id", "link"],
            &[&["1", "https://example.com/\u{0}"], &["2", "https://example.com/ok"]],
        );
        let out = transform_chunk(input, &schema());
        assert_eq!(out.encode_failures, 1);
        assert!(out.chunk.rows[0][1].ends_with("&cu=&fbu="));
        assert!(out.chunk.rows[1][1].contains("%2Fok"));
    }

    #[test]
    fn test_identifier_normalization() {
        let input = chunk(
            &["id", "gtin", "title"],
            &[&["123.0", "123.5", "77.0"], &["ABC123", "00123", "9.50"]],
        );
        let out = transform_chunk(input, &schema()).chunk;
        assert_eq!(out.rows[0][0], "123");
        assert_eq!(out.rows[0][1], "123.5");
        // "title" is not an id column: untouched even though numeric
        assert_eq!(out.rows[0][2], "77.0");
        assert_eq!(out.rows[1][0], "ABC123");
        assert_eq!(out.rows[1][1], "00123");
    }

    #[test]
    fn test_quote_and_framing_scrub() {
        let input = chunk(&["title"], &[&["say \"hi\"\tnow"]]);
        let out = transform_chunk(input, &schema()).chunk;
        assert_eq!(out.rows[0][0], "say hi now");
    }

    #[test]
    fn test_transform_is_deterministic() {
        let make = || chunk(&["id", "link"], &[&["5.0", "https://e.com/p?q=1"]]);
        let a = transform_chunk(make(), &schema()).chunk;
        let b = transform_chunk(make(), &schema()).chunk;
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalize_identifier_edge_cases() {
        assert_eq!(normalize_identifier("123.0"), Some("123".to_string()));
        assert_eq!(normalize_identifier("123"), None);
        assert_eq!(normalize_identifier("123.5"), None);
        assert_eq!(normalize_identifier("ABC"), None);
        assert_eq!(normalize_identifier("-4.0"), Some("-4".to_string()));
        // Beyond 2^53: left alone rather than risking digit corruption
        assert_eq!(normalize_identifier("90071992547409921.0"), None);
    }
}
