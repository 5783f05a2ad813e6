//! `ampfeed preview` command implementation
//!
//! Prints the first rows of a produced feed file, decompressing `.gz`
//! transparently. A quick sanity check after a run.

use crate::error::{CliError, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Print the first `rows` lines of the file
pub async fn run(input: String, rows: usize) -> Result<()> {
    let path = Path::new(&input);
    if !path.exists() {
        return Err(CliError::FileNotFound(input));
    }

    let file = File::open(path)?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut printed = 0usize;
    for line in BufReader::new(reader).lines() {
        if printed >= rows {
            break;
        }
        println!("{}", line?);
        printed += 1;
    }

    if printed == 0 {
        println!("(file is empty)");
    }
    Ok(())
}
