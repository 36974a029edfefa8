mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::input::InputError;
use crate::input::bedgraph::parse_scored_bins;
use crate::input::chrom_sizes::parse_chrom_sizes;
use crate::input::gaps::parse_gap_file;
use crate::model::gaps::GapSet;
use crate::model::params::{CutoffProfile, ScoreFunctionKind};
use crate::model::size::parse_bin_size;
use crate::pipeline::stage1_experiment::load_experiment;
use crate::pipeline::stage3_cutoff::{CutoffOptimizer, OtsuOptimizer};
use crate::pipeline::stage6_report::{Stage6Input, write_reports};
use crate::pipeline::{PipelineError, experiment_as_binary_bins, scored_as_binary_bins};
use crate::report::{InputMeta, ReadsSummary};

#[derive(Debug, Parser)]
#[command(
    name = "edd",
    version,
    about = "Binarize ChIP-seq coverage into enriched (+1) and background (-1) genome bins"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count IP and control reads into bins, score and binarize them
    Run(RunArgs),
    /// Binarize windows from an already-scored bedGraph
    Scored(ScoredArgs),
}

#[derive(Debug, Args)]
struct CutoffArgs {
    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// Gap regions (BED or UCSC gap.txt)
    #[arg(long)]
    gaps: Option<PathBuf>,

    /// Largest fraction of bins accepted as enriched, in (0, 1]
    #[arg(long, value_parser = parse_max_ratio)]
    max_ratio: Option<f64>,

    /// Ignore gaps shorter than this many bp
    #[arg(long)]
    drop_gaps_smaller_than: Option<u64>,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// IP reads (BED, optionally gzipped)
    #[arg(long)]
    ip: PathBuf,

    /// Control/input reads (BED, optionally gzipped)
    #[arg(long)]
    control: PathBuf,

    /// Chromosome sizes table
    #[arg(long)]
    chrom_sizes: PathBuf,

    /// Bin size in bp, or with a kb suffix (e.g. 10kb)
    #[arg(long)]
    bin_size: Option<String>,

    /// Do not scale control counts to the IP library depth
    #[arg(long)]
    no_normalize: bool,

    #[arg(long, value_enum)]
    score: Option<ScoreFunctionKind>,

    #[command(flatten)]
    cutoff: CutoffArgs,
}

#[derive(Debug, Args)]
struct ScoredArgs {
    /// Scored windows (chrom start end score)
    #[arg(long)]
    bedgraph: PathBuf,

    #[command(flatten)]
    cutoff: CutoffArgs,
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    if let Err(err) = run(&cli.command) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: &Command) -> Result<(), PipelineError> {
    match command {
        Command::Run(args) => run_experiment(args),
        Command::Scored(args) => run_scored(args),
    }
}

fn run_experiment(args: &RunArgs) -> Result<(), PipelineError> {
    let profile = resolve_run_profile(args)?;
    let chrom_sizes = parse_chrom_sizes(&args.chrom_sizes)?;
    let gaps = load_gaps(args.cutoff.gaps.as_deref())?;
    let experiment = load_experiment(&args.ip, &args.control, chrom_sizes, profile.bin_size)?;

    let optimizer = OtsuOptimizer;
    let binarized = experiment_as_binary_bins(
        &experiment,
        &profile.score_function,
        &gaps,
        &profile,
        &optimizer,
    )?;

    let input = Stage6Input {
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        input: InputMeta {
            mode: "experiment".to_string(),
            sources: vec![
                ("ip".to_string(), args.ip.display().to_string()),
                ("control".to_string(), args.control.display().to_string()),
                (
                    "chrom_sizes".to_string(),
                    args.chrom_sizes.display().to_string(),
                ),
            ],
            gaps: args.cutoff.gaps.as_ref().map(|p| p.display().to_string()),
            n_gaps: gaps.n_gaps(),
            drop_gaps_smaller_than: profile.drop_gaps_smaller_than,
            bin_size: Some(profile.bin_size),
            normalize: Some(profile.normalize),
            score_function: Some(profile.score_function),
        },
        reads: Some(ReadsSummary {
            ip: experiment.ip.tally,
            control: experiment.control.tally,
            control_scale: experiment.control_scale(profile.normalize),
        }),
        optimizer: optimizer.name(),
        max_ratio: profile.max_ratio,
        binarized: &binarized,
    };
    write_reports(&input, &args.cutoff.out)
}

fn run_scored(args: &ScoredArgs) -> Result<(), PipelineError> {
    let mut profile = CutoffProfile::default_v1();
    apply_cutoff_args(&mut profile, &args.cutoff);
    let gaps = load_gaps(args.cutoff.gaps.as_deref())?;
    let bins = parse_scored_bins(&args.bedgraph)?;

    let optimizer = OtsuOptimizer;
    let binarized = scored_as_binary_bins(bins, &gaps, &profile, &optimizer)?;

    let input = Stage6Input {
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        input: InputMeta {
            mode: "scored".to_string(),
            sources: vec![("bedgraph".to_string(), args.bedgraph.display().to_string())],
            gaps: args.cutoff.gaps.as_ref().map(|p| p.display().to_string()),
            n_gaps: gaps.n_gaps(),
            drop_gaps_smaller_than: profile.drop_gaps_smaller_than,
            bin_size: None,
            normalize: None,
            score_function: None,
        },
        reads: None,
        optimizer: optimizer.name(),
        max_ratio: profile.max_ratio,
        binarized: &binarized,
    };
    write_reports(&input, &args.cutoff.out)
}

fn resolve_run_profile(args: &RunArgs) -> Result<CutoffProfile, PipelineError> {
    let mut profile = CutoffProfile::default_v1();
    if let Some(raw) = &args.bin_size {
        profile.bin_size = parse_bin_size(raw)?;
    }
    if profile.bin_size == 0 {
        return Err(InputError::InvalidInput("bin size must be > 0".to_string()).into());
    }
    profile.normalize = !args.no_normalize;
    if let Some(kind) = args.score {
        profile.score_function = kind;
    }
    apply_cutoff_args(&mut profile, &args.cutoff);
    Ok(profile)
}

fn apply_cutoff_args(profile: &mut CutoffProfile, args: &CutoffArgs) {
    if let Some(max_ratio) = args.max_ratio {
        profile.max_ratio = max_ratio;
    }
    if let Some(min_gap) = args.drop_gaps_smaller_than {
        profile.drop_gaps_smaller_than = min_gap;
    }
}

fn load_gaps(path: Option<&Path>) -> Result<GapSet, InputError> {
    match path {
        Some(p) => parse_gap_file(p),
        None => {
            tracing::info!("no gap file given; bins are split only by chromosome");
            Ok(GapSet::new())
        }
    }
}

fn parse_max_ratio(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid ratio: {s}"))?;
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(format!("ratio must be in (0, 1], got {value}"))
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
