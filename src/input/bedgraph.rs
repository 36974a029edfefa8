use std::path::Path;

use crate::input::{InputError, for_each_record, parse_coord};
use crate::model::bins::GenomicBin;

/// Reads already-scored windows from a bedGraph (`chrom start end score`).
pub fn parse_scored_bins(path: &Path) -> Result<Vec<GenomicBin>, InputError> {
    let mut bins = Vec::new();
    for_each_record(path, |line_no, fields| {
        if fields.len() < 4 {
            return Err(InputError::Parse(format!(
                "{} line {} has <4 columns",
                path.display(),
                line_no
            )));
        }
        let start = parse_coord(fields[1], "start", path, line_no)?;
        let end = parse_coord(fields[2], "end", path, line_no)?;
        let score = fields[3].parse::<f64>().map_err(|_| {
            InputError::Parse(format!(
                "{} line {}: invalid score {:?}",
                path.display(),
                line_no,
                fields[3]
            ))
        })?;
        if !score.is_finite() {
            return Err(InputError::Parse(format!(
                "{} line {}: non-finite score {:?}",
                path.display(),
                line_no,
                fields[3]
            )));
        }
        bins.push(GenomicBin {
            chrom: fields[0].to_string(),
            start,
            end,
            score,
        });
        Ok(())
    })?;

    if bins.is_empty() {
        return Err(InputError::InvalidInput(format!(
            "bedGraph {} has no windows",
            path.display()
        )));
    }
    Ok(bins)
}
