use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod bedgraph;
pub mod chrom_sizes;
pub mod gaps;
pub mod reads;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(path.display().to_string()));
    }
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Streams whitespace-separated records, skipping blank lines, `#`
/// comments and UCSC `track`/`browser` headers. The callback receives the
/// 1-based line number and the fields.
pub fn for_each_record<F>(path: &Path, mut f: F) -> Result<(), InputError>
where
    F: FnMut(usize, &[&str]) -> Result<(), InputError>,
{
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end();
        if line.is_empty() || is_header(line) {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        f(line_no, &fields)?;
    }
    Ok(())
}

fn is_header(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("track") || line.starts_with("browser")
}

pub(crate) fn parse_coord(
    field: &str,
    what: &str,
    path: &Path,
    line_no: usize,
) -> Result<u64, InputError> {
    field.parse::<u64>().map_err(|_| {
        InputError::Parse(format!(
            "{} line {}: invalid {} {:?}",
            path.display(),
            line_no,
            what,
            field
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
