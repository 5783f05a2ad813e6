//! Compressed output writer
//!
//! Single-writer append target for transformed chunks: gzip-compressed,
//! tab-separated, header written exactly once from the first chunk's
//! post-rename column order. Every later chunk is checked against that
//! order before a byte is written; a mismatch is schema drift and aborts
//! the file.
//!
//! Output lands in a `.tmp` sibling and is renamed into place on
//! [`CompressedWriter::finish`], so a failed or interrupted run leaves no
//! half-written file under the final name.

use crate::chunk::Chunk;
use crate::error::{PipelineError, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Gzip TSV writer enforcing the header-once invariant
pub struct CompressedWriter {
    path: PathBuf,
    tmp_path: PathBuf,
    inner: Option<BufWriter<GzEncoder<File>>>,
    columns: Option<Vec<String>>,
    rows_written: u64,
}

impl CompressedWriter {
    /// Create the writer and its temporary output file
    pub fn create(path: &Path) -> Result<Self> {
        let tmp_path = tmp_sibling(path);
        let file = File::create(&tmp_path)?;
        let encoder = GzEncoder::new(file, Compression::default());

        Ok(Self {
            path: path.to_owned(),
            tmp_path,
            inner: Some(BufWriter::new(encoder)),
            columns: None,
            rows_written: 0,
        })
    }

    /// Append one chunk, writing the header first if this is the first
    /// chunk
    ///
    /// Fails with schema drift when the chunk's column order differs from
    /// the established header.
    pub fn write_chunk(&mut self, chunk: &Chunk) -> Result<()> {
        match &self.columns {
            None => {
                self.columns = Some(chunk.columns.to_vec());
                self.write_line(&chunk.columns)?;
            },
            Some(columns) => {
                if columns.as_slice() != chunk.columns.as_slice() {
                    return Err(PipelineError::SchemaDrift {
                        index: chunk.index,
                        expected: columns.clone(),
                        found: chunk.columns.to_vec(),
                    });
                }
            },
        }

        for row in &chunk.rows {
            self.write_line(row)?;
        }
        self.rows_written += chunk.rows.len() as u64;
        Ok(())
    }

    /// Rows appended so far (header excluded)
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush, finish the gzip stream, and rename the output into place
    pub fn finish(mut self) -> Result<u64> {
        let writer = self
            .inner
            .take()
            .ok_or_else(|| PipelineError::pool("writer already finished"))?;
        let encoder = writer
            .into_inner()
            .map_err(|e| PipelineError::Io(e.into_error()))?;
        encoder.finish()?;

        std::fs::rename(&self.tmp_path, &self.path)?;
        Ok(self.rows_written)
    }

    fn write_line<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        let writer = self
            .inner
            .as_mut()
            .ok_or_else(|| PipelineError::pool("writer already finished"))?;

        let mut first = true;
        for field in fields {
            if !first {
                writer.write_all(b"\t")?;
            }
            writer.write_all(field.as_ref().as_bytes())?;
            first = false;
        }
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl Drop for CompressedWriter {
    fn drop(&mut self) {
        // Unfinished writer: discard the temporary file so no partial
        // output survives under any name.
        if self.inner.take().is_some() {
            let _ = std::fs::remove_file(&self.tmp_path);
        }
    }
}

/// Temporary sibling path for atomic replacement
fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use flate2::read::MultiGzDecoder;
    use std::io::Read;
    use std::sync::Arc;

    fn chunk(index: usize, columns: &[&str], rows: &[&[&str]]) -> Chunk {
        Chunk::new(
            index,
            Arc::new(columns.iter().map(|c| c.to_string()).collect()),
            rows.iter()
                .map(|r| r.iter().map(|f| f.to_string()).collect())
                .collect(),
        )
    }

    fn read_gz(path: &Path) -> String {
        let mut out = String::new();
        MultiGzDecoder::new(File::open(path).unwrap())
            .read_to_string(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_header_written_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv.gz");

        let mut writer = CompressedWriter::create(&path).unwrap();
        writer.write_chunk(&chunk(0, &["a", "b"], &[&["1", "2"]])).unwrap();
        writer.write_chunk(&chunk(1, &["a", "b"], &[&["3", "4"]])).unwrap();
        writer.write_chunk(&chunk(2, &["a", "b"], &[&["5", "6"]])).unwrap();
        assert_eq!(writer.finish().unwrap(), 3);

        let content = read_gz(&path);
        assert_eq!(content, "a\tb\n1\t2\n3\t4\n5\t6\n");
        assert_eq!(content.matches("a\tb").count(), 1);
    }

    #[test]
    fn test_schema_drift_detected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv.gz");

        let mut writer = CompressedWriter::create(&path).unwrap();
        writer.write_chunk(&chunk(0, &["a", "b"], &[&["1", "2"]])).unwrap();
        let err = writer
            .write_chunk(&chunk(1, &["b", "a"], &[&["2", "1"]]))
            .unwrap_err();
        assert!(matches!(err, PipelineError::SchemaDrift { index: 1, .. }));

        // The aborted write leaves no output file under the final name
        drop(writer);
        assert!(!path.exists());
        assert!(!tmp_sibling(&path).exists());
    }

    #[test]
    fn test_unfinished_writer_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv.gz");

        let mut writer = CompressedWriter::create(&path).unwrap();
        writer.write_chunk(&chunk(0, &["a"], &[&["1"]])).unwrap();
        drop(writer);

        assert!(!path.exists());
        assert!(!tmp_sibling(&path).exists());
    }
}
