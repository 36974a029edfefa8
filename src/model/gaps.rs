use std::collections::HashMap;

/// Half-open `[start, end)` region excluded from binning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub start: u64,
    pub end: u64,
}

impl Gap {
    pub fn size(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GapSet {
    by_chrom: HashMap<String, Vec<Gap>>,
}

impl GapSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chrom: &str, start: u64, end: u64) {
        let gaps = self.by_chrom.entry(chrom.to_string()).or_default();
        let gap = Gap { start, end };
        let idx = gaps.partition_point(|g| (g.start, g.end) <= (start, end));
        gaps.insert(idx, gap);
    }

    pub fn gaps(&self, chrom: &str) -> &[Gap] {
        self.by_chrom.get(chrom).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn n_gaps(&self) -> usize {
        self.by_chrom.values().map(Vec::len).sum()
    }

    /// Gaps of at least `min_size` bp on `chrom`, merged into disjoint
    /// intervals sorted by start.
    pub fn retained(&self, chrom: &str, min_size: u64) -> Vec<Gap> {
        let mut merged: Vec<Gap> = Vec::new();
        for gap in self.gaps(chrom) {
            if gap.size() == 0 || gap.size() < min_size {
                continue;
            }
            match merged.last_mut() {
                Some(last) if gap.start <= last.end => last.end = last.end.max(gap.end),
                _ => merged.push(*gap),
            }
        }
        merged
    }
}
