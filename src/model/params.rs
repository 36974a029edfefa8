use clap::ValueEnum;
use serde::Serialize;

pub const DEFAULT_MAX_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreFunctionKind {
    /// log2((ip + 1) / (control + 1))
    LogRatio,
    /// ip - control
    Difference,
}

#[derive(Debug, Clone)]
pub struct CutoffProfile {
    pub bin_size: u64,
    pub max_ratio: f64,
    pub normalize: bool,
    pub drop_gaps_smaller_than: u64,
    pub score_function: ScoreFunctionKind,
}

impl CutoffProfile {
    pub fn default_v1() -> Self {
        Self {
            bin_size: 10_000,
            max_ratio: DEFAULT_MAX_RATIO,
            normalize: true,
            drop_gaps_smaller_than: 0,
            score_function: ScoreFunctionKind::LogRatio,
        }
    }
}
