pub mod stage1_experiment;
pub mod stage2_bins;
pub mod stage3_cutoff;
pub mod stage4_select;
pub mod stage5_classify;
pub mod stage6_report;

use thiserror::Error;

use crate::input::InputError;
use crate::model::bins::{GenomeBins, GenomicBin};
use crate::model::cutoff::{CutoffError, CutoffResult};
use crate::model::gaps::GapSet;
use crate::model::labels::BinaryGenomeBins;
use crate::model::params::CutoffProfile;
use crate::model::size::ParseSizeError;
use stage1_experiment::Experiment;
use stage2_bins::{ScoreFunction, counts_as_genome_bins, scored_as_genome_bins};
use stage3_cutoff::{CutoffOptimizer, ScoreDistribution};
use stage4_select::{ThresholdSelection, select_threshold};
use stage5_classify::genome_bins_as_binary;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("cutoff selection failed: {0}")]
    Cutoff(#[from] CutoffError),
    #[error(transparent)]
    Size(#[from] ParseSizeError),
    #[error("failed to write reports: {0}")]
    Report(#[from] std::io::Error),
    #[error("failed to serialize summary: {0}")]
    Summary(#[from] serde_json::Error),
    #[error("{0} bins have non-finite scores")]
    NonFiniteScores(usize),
}

/// Labels plus everything that went into choosing them.
#[derive(Debug, Clone)]
pub struct Binarized {
    pub labels: BinaryGenomeBins,
    pub cutoff: CutoffResult<ScoreDistribution>,
    pub selection: ThresholdSelection,
    pub n_runs: usize,
}

pub fn experiment_as_binary_bins(
    experiment: &Experiment,
    score_function: &dyn ScoreFunction,
    gaps: &GapSet,
    profile: &CutoffProfile,
    optimizer: &dyn CutoffOptimizer,
) -> Result<Binarized, PipelineError> {
    let rows = experiment.as_data_frame(profile.normalize);
    let genome_bins = counts_as_genome_bins(
        rows,
        score_function,
        gaps,
        profile.drop_gaps_smaller_than,
    );
    binarize(&genome_bins, profile.max_ratio, optimizer)
}

pub fn scored_as_binary_bins(
    bins: Vec<GenomicBin>,
    gaps: &GapSet,
    profile: &CutoffProfile,
    optimizer: &dyn CutoffOptimizer,
) -> Result<Binarized, PipelineError> {
    let genome_bins = scored_as_genome_bins(bins, gaps, profile.drop_gaps_smaller_than);
    binarize(&genome_bins, profile.max_ratio, optimizer)
}

fn binarize(
    genome_bins: &GenomeBins,
    max_ratio: f64,
    optimizer: &dyn CutoffOptimizer,
) -> Result<Binarized, PipelineError> {
    tracing::info!(
        "{} bins in {} runs across {} chromosomes",
        genome_bins.n_bins(),
        genome_bins.n_runs(),
        genome_bins.chroms.len()
    );

    let distribution = ScoreDistribution::from_chrom_scores(&genome_bins.chrom_scores());
    // An infinite score would be labelled enriched at any threshold.
    if distribution.n_non_finite() > 0 {
        return Err(PipelineError::NonFiniteScores(distribution.n_non_finite()));
    }
    let cutoff = optimizer.optimize(distribution)?;
    tracing::info!(
        "optimal cutoff {:.4} gives a ratio of {:.4}",
        cutoff.limit_value,
        cutoff.ratio
    );

    let selection = select_threshold(&cutoff, max_ratio)?;
    selection.log_warnings();

    let labels = genome_bins_as_binary(genome_bins, selection.threshold);
    tracing::info!(
        "threshold {:.4}: {} of {} bins enriched",
        selection.threshold,
        labels.n_enriched(),
        labels.n_bins()
    );

    Ok(Binarized {
        labels,
        cutoff,
        selection,
        n_runs: genome_bins.n_runs(),
    })
}
