use crate::model::bins::{GenomeBins, GenomicBin};
use crate::model::gaps::GapSet;
use crate::model::params::ScoreFunctionKind;
use crate::pipeline::stage1_experiment::WindowCounts;

/// Turns a window's IP and control counts into one score.
pub trait ScoreFunction {
    fn score(&self, ip: f64, control: f64) -> f64;
}

impl<F> ScoreFunction for F
where
    F: Fn(f64, f64) -> f64,
{
    fn score(&self, ip: f64, control: f64) -> f64 {
        self(ip, control)
    }
}

impl ScoreFunction for ScoreFunctionKind {
    fn score(&self, ip: f64, control: f64) -> f64 {
        match self {
            ScoreFunctionKind::LogRatio => ((ip + 1.0) / (control + 1.0)).log2(),
            ScoreFunctionKind::Difference => ip - control,
        }
    }
}

pub fn counts_as_genome_bins(
    rows: Vec<WindowCounts>,
    score_function: &dyn ScoreFunction,
    gaps: &GapSet,
    drop_gaps_smaller_than: u64,
) -> GenomeBins {
    let bins = rows.into_iter().map(|row| GenomicBin {
        score: score_function.score(row.ip, row.control),
        chrom: row.chrom,
        start: row.start,
        end: row.end,
    });
    GenomeBins::with_gaps(bins, gaps, drop_gaps_smaller_than)
}

pub fn scored_as_genome_bins(
    bins: Vec<GenomicBin>,
    gaps: &GapSet,
    drop_gaps_smaller_than: u64,
) -> GenomeBins {
    GenomeBins::with_gaps(bins, gaps, drop_gaps_smaller_than)
}
