use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum CutoffError {
    #[error("target ratio {0} is outside [0, 1]")]
    InvalidRatio(f64),
    #[error("cannot estimate a cutoff from an empty score distribution")]
    EmptyDistribution,
}

/// Maps a target enriched fraction to the score threshold producing it.
///
/// Implementations must be monotone non-increasing in `target_ratio`, and
/// the fraction of scores at or above the returned threshold must not
/// exceed `target_ratio`.
pub trait ThresholdEstimator {
    fn estimate(&self, target_ratio: f64) -> Result<f64, CutoffError>;
}

impl<T: ThresholdEstimator + ?Sized> ThresholdEstimator for &T {
    fn estimate(&self, target_ratio: f64) -> Result<f64, CutoffError> {
        (**self).estimate(target_ratio)
    }
}

/// Outcome of a cutoff search: the optimal limit, the enriched fraction it
/// yields, and an estimator for other fractions.
#[derive(Debug, Clone)]
pub struct CutoffResult<E> {
    pub limit_value: f64,
    pub ratio: f64,
    pub estimator: E,
}

impl<E: ThresholdEstimator> CutoffResult<E> {
    pub fn new(limit_value: f64, ratio: f64, estimator: E) -> Self {
        Self {
            limit_value,
            ratio,
            estimator,
        }
    }

    pub fn get_limit_score(&self, target_ratio: f64) -> Result<f64, CutoffError> {
        self.estimator.estimate(target_ratio)
    }
}
