//! Chunked catalog reader
//!
//! Walks a delimited source file (plain or gzipped, selected by file
//! extension) in bounded row batches. Values are never type-inferred: every
//! field stays a raw string, so large numeric identifiers cannot silently
//! lose precision on the way in. The sequence of chunks is lazy, finite,
//! non-restartable, and covers the file in original row order with no row
//! duplicated or dropped across chunk boundaries.

use crate::chunk::Chunk;
use crate::error::ReadError;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default rows per chunk; multi-gigabyte catalogs stream through in
/// bounded memory at this batch size
pub const DEFAULT_CHUNK_SIZE: usize = 500_000;

/// Streaming reader producing [`Chunk`]s from one source file
pub struct ChunkedReader {
    path: PathBuf,
    inner: csv::Reader<Box<dyn Read + Send>>,
    columns: Arc<Vec<String>>,
    chunk_size: usize,
    next_index: usize,
    done: bool,
}

impl std::fmt::Debug for ChunkedReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedReader")
            .field("path", &self.path)
            .field("columns", &self.columns)
            .field("chunk_size", &self.chunk_size)
            .field("next_index", &self.next_index)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl ChunkedReader {
    /// Open a source file and read its header row
    ///
    /// Files ending in `.gz` are transparently decompressed. Fails when the
    /// file cannot be opened or the header cannot be parsed under the given
    /// delimiter.
    pub fn open(path: &Path, delimiter: u8, chunk_size: usize) -> Result<Self, ReadError> {
        let raw: Box<dyn Read + Send> = open_input(path)?;

        let mut inner = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(raw);

        let columns: Vec<String> = inner
            .headers()
            .map_err(|source| ReadError::Malformed {
                path: path.to_owned(),
                source,
            })?
            .iter()
            .map(str::to_string)
            .collect();

        Ok(Self {
            path: path.to_owned(),
            inner,
            columns: Arc::new(columns),
            chunk_size: chunk_size.max(1),
            next_index: 0,
            done: false,
        })
    }

    /// Column names from the header row, in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Fail unless every named column appears in the header
    pub fn require_columns(&self, required: &[&str]) -> Result<(), ReadError> {
        for column in required {
            if !self.columns.iter().any(|c| c == column) {
                return Err(ReadError::MissingColumn {
                    path: self.path.clone(),
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Open the underlying byte stream, decompressing `.gz` inputs
fn open_input(path: &Path) -> Result<Box<dyn Read + Send>, ReadError> {
    let file = File::open(path).map_err(|source| ReadError::Open {
        path: path.to_owned(),
        source,
    })?;

    let buffered = BufReader::new(file);
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(MultiGzDecoder::new(buffered)))
    } else {
        Ok(Box::new(buffered))
    }
}

impl Iterator for ChunkedReader {
    type Item = Result<Chunk, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let width = self.columns.len();
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut record = csv::StringRecord::new();

        while rows.len() < self.chunk_size {
            match self.inner.read_record(&mut record) {
                Ok(true) => {
                    let mut row: Vec<String> = record.iter().map(str::to_string).collect();
                    // Ragged rows are padded or cut to header width rather
                    // than dropped; downstream counts must match the source.
                    row.resize(width, String::new());
                    rows.push(row);
                },
                Ok(false) => {
                    self.done = true;
                    break;
                },
                Err(source) => {
                    self.done = true;
                    return Some(Err(ReadError::Malformed {
                        path: self.path.clone(),
                        source,
                    }));
                },
            }
        }

        if rows.is_empty() {
            return None;
        }

        let chunk = Chunk::new(self.next_index, Arc::clone(&self.columns), rows);
        self.next_index += 1;
        Some(Ok(chunk))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_all_rows_across_chunk_boundaries() {
        let file = write_temp("a,b\n1,2\n3,4\n5,6\n7,8\n9,10\n");
        let reader = ChunkedReader::open(file.path(), b',', 2).unwrap();

        let chunks: Vec<Chunk> = reader.map(|c| c.unwrap()).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[2].index, 2);
        assert_eq!(chunks.iter().map(Chunk::len).sum::<usize>(), 5);
        assert_eq!(chunks[2].rows[0], vec!["9", "10"]);
    }

    #[test]
    fn test_values_stay_raw_strings() {
        let file = write_temp("gtin,price\n00012345678905,19.90\n");
        let mut reader = ChunkedReader::open(file.path(), b',', 10).unwrap();
        let chunk = reader.next().unwrap().unwrap();
        // Leading zeros survive: no numeric inference on read
        assert_eq!(chunk.rows[0][0], "00012345678905");
    }

    #[test]
    fn test_ragged_rows_padded_and_truncated() {
        let file = write_temp("a,b,c\n1,2\n1,2,3,4\n");
        let mut reader = ChunkedReader::open(file.path(), b',', 10).unwrap();
        let chunk = reader.next().unwrap().unwrap();
        assert_eq!(chunk.rows[0], vec!["1", "2", ""]);
        assert_eq!(chunk.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = ChunkedReader::open(Path::new("/no/such/catalog.csv"), b',', 10).unwrap_err();
        assert!(matches!(err, ReadError::Open { .. }));
    }

    #[test]
    fn test_require_columns() {
        let file = write_temp("id,link\n1,https://example.com\n");
        let reader = ChunkedReader::open(file.path(), b',', 10).unwrap();
        assert!(reader.require_columns(&["link"]).is_ok());
        let err = reader.require_columns(&["Link"]).unwrap_err();
        assert!(matches!(err, ReadError::MissingColumn { column, .. } if column == "Link"));
    }

    #[test]
    fn test_gzip_input_by_extension() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.csv.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"a,b\nx,y\n").unwrap();
        encoder.finish().unwrap();

        let mut reader = ChunkedReader::open(&path, b',', 10).unwrap();
        let chunk = reader.next().unwrap().unwrap();
        assert_eq!(chunk.rows, vec![vec!["x", "y"]]);
    }

    #[test]
    fn test_tab_delimited_input() {
        let file = write_temp("a\tb\n1\t2\n");
        let mut reader = ChunkedReader::open(file.path(), b'\t', 10).unwrap();
        let chunk = reader.next().unwrap().unwrap();
        assert_eq!(chunk.columns.as_slice(), ["a", "b"]);
        assert_eq!(chunk.rows[0], vec!["1", "2"]);
    }
}
