use std::fmt;

use serde::Serialize;

use crate::model::cutoff::{CutoffError, CutoffResult, ThresholdEstimator};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionWarning {
    RatioTooHigh { ratio: f64, max_ratio: f64 },
    NonOptimalLimit { limit_value: f64, ratio: f64 },
}

impl fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionWarning::RatioTooHigh { ratio, max_ratio } => write!(
                f,
                "Estimated optimal cutoff gives a too high ratio ({ratio:.2} > {max_ratio:.2}). \
                 Consider increasing the bin size."
            ),
            SelectionWarning::NonOptimalLimit { limit_value, ratio } => write!(
                f,
                "Using non-optimal {limit_value:.3} as lim value as it gives a ratio of {ratio:.2}."
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPath {
    Optimal,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdSelection {
    pub threshold: f64,
    pub path: SelectionPath,
    pub warnings: Vec<SelectionWarning>,
}

impl ThresholdSelection {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
    }
}

/// Picks the score threshold for binarizing bins.
///
/// `max_ratio` is the largest fraction of bins the caller accepts as
/// enriched. When the optimal limit marks strictly more than that, the
/// estimator is asked for the threshold giving exactly `max_ratio` and two
/// warnings are attached. Estimator failures are returned as-is.
pub fn select_threshold<E: ThresholdEstimator>(
    result: &CutoffResult<E>,
    max_ratio: f64,
) -> Result<ThresholdSelection, CutoffError> {
    if result.ratio > max_ratio {
        let mut warnings = vec![SelectionWarning::RatioTooHigh {
            ratio: result.ratio,
            max_ratio,
        }];
        let threshold = result.get_limit_score(max_ratio)?;
        warnings.push(SelectionWarning::NonOptimalLimit {
            limit_value: threshold,
            ratio: max_ratio,
        });
        return Ok(ThresholdSelection {
            threshold,
            path: SelectionPath::Fallback,
            warnings,
        });
    }

    Ok(ThresholdSelection {
        threshold: result.limit_value,
        path: SelectionPath::Optimal,
        warnings: Vec::new(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_select.rs"]
mod tests;
