use std::collections::HashMap;

use crate::model::gaps::{Gap, GapSet};

/// A fixed-size window on a chromosome carrying its score.
#[derive(Debug, Clone, PartialEq)]
pub struct GenomicBin {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub score: f64,
}

/// Consecutive bins on one chromosome with no gap between them.
pub type BinRun = Vec<GenomicBin>;

#[derive(Debug, Clone)]
pub struct ChromBins {
    pub chrom: String,
    pub runs: Vec<BinRun>,
}

#[derive(Debug, Clone, Default)]
pub struct GenomeBins {
    pub chroms: Vec<ChromBins>,
}

/// Bin scores grouped by chromosome, in genome order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChromosomeScoreSet {
    pub chroms: Vec<(String, Vec<f64>)>,
}

impl ChromosomeScoreSet {
    pub fn iter_scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.chroms.iter().flat_map(|(_, s)| s.iter().copied())
    }
}

impl GenomeBins {
    /// Groups bins per chromosome (first-seen order) and splits each
    /// chromosome into runs at gaps of at least `drop_gaps_smaller_than` bp.
    /// Bins overlapping a retained gap are excluded.
    pub fn with_gaps<I>(bins: I, gaps: &GapSet, drop_gaps_smaller_than: u64) -> Self
    where
        I: IntoIterator<Item = GenomicBin>,
    {
        let mut chroms = Vec::new();
        for (chrom, mut chrom_bins) in group_by_chrom(bins) {
            chrom_bins.sort_by_key(|b| b.start);
            let retained = gaps.retained(&chrom, drop_gaps_smaller_than);
            let runs = split_runs(chrom_bins, &retained);
            if runs.is_empty() {
                tracing::debug!("chromosome {} has no bins outside gaps", chrom);
                continue;
            }
            chroms.push(ChromBins { chrom, runs });
        }
        GenomeBins { chroms }
    }

    pub fn chrom_scores(&self) -> ChromosomeScoreSet {
        let chroms = self
            .chroms
            .iter()
            .map(|c| {
                let scores = c.runs.iter().flatten().map(|b| b.score).collect();
                (c.chrom.clone(), scores)
            })
            .collect();
        ChromosomeScoreSet { chroms }
    }

    pub fn n_bins(&self) -> usize {
        self.chroms
            .iter()
            .flat_map(|c| c.runs.iter())
            .map(Vec::len)
            .sum()
    }

    pub fn n_runs(&self) -> usize {
        self.chroms.iter().map(|c| c.runs.len()).sum()
    }
}

fn group_by_chrom<I>(bins: I) -> Vec<(String, Vec<GenomicBin>)>
where
    I: IntoIterator<Item = GenomicBin>,
{
    let mut order: Vec<(String, Vec<GenomicBin>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for bin in bins {
        let idx = match index.get(bin.chrom.as_str()) {
            Some(&idx) => idx,
            None => {
                index.insert(bin.chrom.clone(), order.len());
                order.push((bin.chrom.clone(), Vec::new()));
                order.len() - 1
            }
        };
        order[idx].1.push(bin);
    }
    order
}

/// `bins` sorted by start, `gaps` disjoint and sorted.
fn split_runs(bins: Vec<GenomicBin>, gaps: &[Gap]) -> Vec<BinRun> {
    let mut runs = Vec::new();
    let mut current: BinRun = Vec::new();
    let mut gi = 0usize;

    for bin in bins {
        let mut crossed_gap = false;
        while gi < gaps.len() && gaps[gi].end <= bin.start {
            crossed_gap = true;
            gi += 1;
        }
        let overlaps_gap = gi < gaps.len() && gaps[gi].start < bin.end;
        if (overlaps_gap || crossed_gap) && !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
        if overlaps_gap {
            continue;
        }
        current.push(bin);
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/bins.rs"]
mod tests;
