//! Post-hoc header rewrite
//!
//! Renames the column header of an already-compressed feed file without
//! touching the body: decompress the first line, substitute column names
//! via the schema mapping, then stream the remaining bytes into a freshly
//! compressed output. Used when a run writes raw column names in a parallel
//! pass and renaming is deferred.

use crate::error::{PipelineError, ReadError, Result};
use crate::schema::SourceSchema;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Rewrite the header line of `input` into `output`
///
/// Returns the number of body bytes copied. Fails with an empty-file error
/// when the input has no header line.
pub fn rewrite_header(input: &Path, output: &Path, schema: &SourceSchema) -> Result<u64> {
    let file = File::open(input).map_err(|source| ReadError::Open {
        path: input.to_owned(),
        source,
    })?;
    let mut reader = BufReader::new(MultiGzDecoder::new(file));

    let mut first_line = String::new();
    let header_bytes = reader.read_line(&mut first_line)?;
    if header_bytes == 0 {
        return Err(PipelineError::EmptyFile(input.to_owned()));
    }

    let renamed: Vec<&str> = first_line
        .trim_end_matches(['\r', '\n'])
        .split('\t')
        .map(|column| schema.output_name(column))
        .collect();

    let tmp_path = {
        let mut name = output
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        output.with_file_name(name)
    };

    let result = (|| -> Result<u64> {
        let out_file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(GzEncoder::new(out_file, Compression::default()));

        writer.write_all(renamed.join("\t").as_bytes())?;
        writer.write_all(b"\n")?;

        // Body is copied byte-for-byte; only the header line changes.
        let copied = std::io::copy(&mut reader, &mut writer)?;

        let encoder = writer
            .into_inner()
            .map_err(|e| PipelineError::Io(e.into_error()))?;
        encoder.finish()?;

        std::fs::rename(&tmp_path, output)?;
        Ok(copied)
    })();

    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::link::TrackingTemplate;
    use std::io::Read;

    fn schema() -> SourceSchema {
        SourceSchema::new("acme", "link", TrackingTemplate::new("https://t.example/?c=1"))
            .with_mapping(&[("link", "URL"), ("title", "Name")])
    }

    fn write_gz(path: &Path, content: &str) {
        let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap();
    }

    fn read_gz(path: &Path) -> String {
        let mut out = String::new();
        MultiGzDecoder::new(File::open(path).unwrap())
            .read_to_string(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_header_substituted_body_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.tsv.gz");
        let output = dir.path().join("out.tsv.gz");
        write_gz(&input, "title\tlink\tcolor\nShoe\thttps://e.com\tred\n");

        rewrite_header(&input, &output, &schema()).unwrap();

        assert_eq!(read_gz(&output), "Name\tURL\tcolor\nShoe\thttps://e.com\tred\n");
    }

    #[test]
    fn test_empty_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.tsv.gz");
        let output = dir.path().join("out.tsv.gz");
        write_gz(&input, "");

        let err = rewrite_header(&input, &output, &schema()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyFile(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_header_only_file_is_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.tsv.gz");
        let output = dir.path().join("out.tsv.gz");
        write_gz(&input, "title\tlink\n");

        let copied = rewrite_header(&input, &output, &schema()).unwrap();
        assert_eq!(copied, 0);
        assert_eq!(read_gz(&output), "Name\tURL\n");
    }

    #[test]
    fn test_missing_input_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = rewrite_header(
            Path::new("/no/such/file.tsv.gz"),
            &dir.path().join("out.tsv.gz"),
            &schema(),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Read(ReadError::Open { .. })));
    }
}
