use std::path::Path;

use crate::input::{InputError, for_each_record, parse_coord};
use crate::model::gaps::GapSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GapLayout {
    Bed,
    /// UCSC `gap.txt`: bin, chrom, chromStart, chromEnd, ix, n, size, type, bridge.
    Ucsc,
}

impl GapLayout {
    fn detect(fields: &[&str]) -> Self {
        let is_ucsc = fields.len() >= 8
            && fields[0].parse::<u64>().is_ok()
            && fields[1].parse::<u64>().is_err()
            && fields[2].parse::<u64>().is_ok()
            && fields[3].parse::<u64>().is_ok()
            && matches!(fields[5], "N" | "U");
        if is_ucsc { GapLayout::Ucsc } else { GapLayout::Bed }
    }

    fn offset(self) -> usize {
        match self {
            GapLayout::Bed => 0,
            GapLayout::Ucsc => 1,
        }
    }
}

/// Loads gap regions from a BED file or a UCSC `gap.txt` dump. The layout
/// is fixed by the first record and applies to the whole file.
pub fn parse_gap_file(path: &Path) -> Result<GapSet, InputError> {
    let mut gaps = GapSet::new();
    let mut layout: Option<GapLayout> = None;
    for_each_record(path, |line_no, fields| {
        let layout = *layout.get_or_insert_with(|| GapLayout::detect(fields));
        let cols = &fields[layout.offset().min(fields.len())..];
        if cols.len() < 3 {
            return Err(InputError::Parse(format!(
                "{} line {} has <3 columns",
                path.display(),
                line_no
            )));
        }
        let start = parse_coord(cols[1], "gap start", path, line_no)?;
        let end = parse_coord(cols[2], "gap end", path, line_no)?;
        if end < start {
            return Err(InputError::Parse(format!(
                "{} line {}: gap end {} before start {}",
                path.display(),
                line_no,
                end,
                start
            )));
        }
        gaps.insert(cols[0], start, end);
        Ok(())
    })?;
    tracing::debug!("loaded {} gaps from {}", gaps.n_gaps(), path.display());
    Ok(gaps)
}
