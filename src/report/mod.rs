use serde::Serialize;

use crate::model::params::ScoreFunctionKind;
use crate::pipeline::stage1_experiment::ReadTally;
use crate::pipeline::stage4_select::{SelectionPath, SelectionWarning};

pub mod json;
pub mod text;

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMeta {
    pub mode: String,
    pub sources: Vec<(String, String)>,
    pub gaps: Option<String>,
    pub n_gaps: usize,
    pub drop_gaps_smaller_than: u64,
    pub bin_size: Option<u64>,
    pub normalize: Option<bool>,
    pub score_function: Option<ScoreFunctionKind>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadsSummary {
    pub ip: ReadTally,
    pub control: ReadTally,
    pub control_scale: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CutoffSummary {
    pub optimizer: String,
    pub optimal_limit: f64,
    pub optimal_ratio: f64,
    pub max_ratio: f64,
    pub threshold: f64,
    pub path: SelectionPath,
    pub warnings: Vec<SelectionWarning>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BinSummary {
    pub n_chroms: usize,
    pub n_runs: usize,
    pub n_bins: usize,
    pub n_enriched: usize,
    pub enriched_fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreSummary {
    pub n_scores: usize,
    pub min: Option<f64>,
    pub p10: Option<f64>,
    pub median: Option<f64>,
    pub p90: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub input: InputMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reads: Option<ReadsSummary>,
    pub cutoff: CutoffSummary,
    pub bins: BinSummary,
    pub scores: ScoreSummary,
}

pub fn format_f64_4(v: f64) -> String {
    format!("{:.4}", v)
}

pub fn format_opt_f64_4(v: Option<f64>) -> String {
    v.map(format_f64_4).unwrap_or_else(|| "NA".to_string())
}
