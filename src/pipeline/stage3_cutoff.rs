use crate::model::bins::ChromosomeScoreSet;
use crate::model::cutoff::{CutoffError, CutoffResult, ThresholdEstimator};

/// Sorted finite scores of all kept bins. Non-finite scores are only counted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreDistribution {
    sorted: Vec<f64>,
    n_non_finite: usize,
}

impl ScoreDistribution {
    pub fn from_chrom_scores(scores: &ChromosomeScoreSet) -> Self {
        Self::from_scores(scores.iter_scores())
    }

    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = Vec::new();
        let mut n_non_finite = 0usize;
        for s in scores {
            if s.is_finite() {
                sorted.push(s);
            } else {
                n_non_finite += 1;
            }
        }
        sorted.sort_by(f64::total_cmp);
        Self {
            sorted,
            n_non_finite,
        }
    }

    pub fn scores(&self) -> &[f64] {
        &self.sorted
    }

    pub fn n_non_finite(&self) -> usize {
        self.n_non_finite
    }

    /// Fraction of scores at or above `threshold`.
    pub fn ratio_at(&self, threshold: f64) -> f64 {
        let n = self.sorted.len();
        if n == 0 {
            return 0.0;
        }
        let below = self.sorted.partition_point(|&s| s < threshold);
        (n - below) as f64 / n as f64
    }

    /// Score at sorted index `ceil((n - 1) * p)`, `p` clamped to `[0, 1]`.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        let n = self.sorted.len();
        if n == 0 {
            return None;
        }
        let idx = ((n - 1) as f64 * p.clamp(0.0, 1.0)).ceil() as usize;
        Some(self.sorted[idx])
    }
}

impl ThresholdEstimator for ScoreDistribution {
    /// Smallest observed score whose upper tail, ties included, holds at
    /// most `floor(target_ratio * n)` scores. Past the maximum when no
    /// observed score qualifies.
    fn estimate(&self, target_ratio: f64) -> Result<f64, CutoffError> {
        if !(0.0..=1.0).contains(&target_ratio) {
            return Err(CutoffError::InvalidRatio(target_ratio));
        }
        let s = &self.sorted;
        let n = s.len();
        if n == 0 {
            return Err(CutoffError::EmptyDistribution);
        }
        let k = ((target_ratio * n as f64).floor() as usize).min(n);
        let mut idx = n - k;
        while idx > 0 && idx < n && s[idx] == s[idx - 1] {
            idx += 1;
        }
        if idx == n {
            Ok(s[n - 1].next_up())
        } else {
            Ok(s[idx])
        }
    }
}

pub trait CutoffOptimizer {
    fn name(&self) -> &'static str;

    fn optimize(
        &self,
        distribution: ScoreDistribution,
    ) -> Result<CutoffResult<ScoreDistribution>, CutoffError>;
}

/// Splits the score distribution where the between-class variance
/// `w0 * w1 * (mu0 - mu1)^2` is largest.
#[derive(Debug, Clone, Copy, Default)]
pub struct OtsuOptimizer;

impl CutoffOptimizer for OtsuOptimizer {
    fn name(&self) -> &'static str {
        "otsu"
    }

    fn optimize(
        &self,
        distribution: ScoreDistribution,
    ) -> Result<CutoffResult<ScoreDistribution>, CutoffError> {
        let s = distribution.scores();
        if s.is_empty() {
            return Err(CutoffError::EmptyDistribution);
        }
        let n = s.len();
        let total: f64 = s.iter().sum();

        let mut best: Option<(f64, usize)> = None;
        let mut sum_low = 0.0f64;
        for i in 1..n {
            sum_low += s[i - 1];
            if s[i] == s[i - 1] {
                continue;
            }
            let w0 = i as f64 / n as f64;
            let w1 = 1.0 - w0;
            let mu0 = sum_low / i as f64;
            let mu1 = (total - sum_low) / (n - i) as f64;
            let between = w0 * w1 * (mu0 - mu1).powi(2);
            if best.is_none_or(|(v, _)| between > v) {
                best = Some((between, i));
            }
        }

        let limit_value = match best {
            Some((_, split)) => s[split],
            None => s[0],
        };
        let ratio = distribution.ratio_at(limit_value);
        tracing::debug!(
            "{} cutoff: limit {:.4} marks {:.4} of {} bins",
            self.name(),
            limit_value,
            ratio,
            n
        );
        Ok(CutoffResult::new(limit_value, ratio, distribution))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_cutoff.rs"]
mod tests;
