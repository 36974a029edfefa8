use std::path::Path;

use crate::input::{InputError, for_each_record, parse_coord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadInterval<'a> {
    pub chrom: &'a str,
    pub start: u64,
    pub end: u64,
}

impl ReadInterval<'_> {
    pub fn midpoint(&self) -> u64 {
        self.start + (self.end - self.start) / 2
    }
}

/// Streams reads from a BED file (first three columns used).
pub fn for_each_read<F>(path: &Path, mut f: F) -> Result<(), InputError>
where
    F: FnMut(ReadInterval<'_>),
{
    for_each_record(path, |line_no, fields| {
        if fields.len() < 3 {
            return Err(InputError::Parse(format!(
                "{} line {} has <3 columns",
                path.display(),
                line_no
            )));
        }
        let start = parse_coord(fields[1], "start", path, line_no)?;
        let end = parse_coord(fields[2], "end", path, line_no)?;
        if end < start {
            return Err(InputError::Parse(format!(
                "{} line {}: end {} before start {}",
                path.display(),
                line_no,
                end,
                start
            )));
        }
        f(ReadInterval {
            chrom: fields[0],
            start,
            end,
        });
        Ok(())
    })
}
