use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinLabel {
    Enriched,
    Background,
}

impl BinLabel {
    /// Bins scoring exactly at the threshold are enriched.
    pub fn from_score(score: f64, threshold: f64) -> Self {
        if score >= threshold {
            BinLabel::Enriched
        } else {
            BinLabel::Background
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            BinLabel::Enriched => 1,
            BinLabel::Background => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledBin {
    pub start: u64,
    pub end: u64,
    pub label: BinLabel,
}

#[derive(Debug, Clone)]
pub struct LabeledChrom {
    pub chrom: String,
    pub runs: Vec<Vec<LabeledBin>>,
}

#[derive(Debug, Clone, Default)]
pub struct BinaryGenomeBins {
    pub chroms: Vec<LabeledChrom>,
}

impl BinaryGenomeBins {
    fn labels(&self) -> impl Iterator<Item = BinLabel> + '_ {
        self.chroms
            .iter()
            .flat_map(|c| c.runs.iter().flatten())
            .map(|b| b.label)
    }

    pub fn n_bins(&self) -> usize {
        self.labels().count()
    }

    pub fn n_enriched(&self) -> usize {
        self.labels().filter(|&l| l == BinLabel::Enriched).count()
    }

    pub fn enriched_fraction(&self) -> f64 {
        let n = self.n_bins();
        if n == 0 {
            return 0.0;
        }
        self.n_enriched() as f64 / n as f64
    }
}
