use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::labels::BinaryGenomeBins;
use crate::pipeline::{Binarized, PipelineError};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    BinSummary, CutoffSummary, InputMeta, ReadsSummary, ScoreSummary, SummaryData, ToolMeta,
};

#[derive(Debug, Clone)]
pub struct Stage6Input<'a> {
    pub tool_name: String,
    pub tool_version: String,
    pub input: InputMeta,
    pub reads: Option<ReadsSummary>,
    pub optimizer: &'a str,
    pub max_ratio: f64,
    pub binarized: &'a Binarized,
}

pub fn write_reports(input: &Stage6Input<'_>, out_dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(out_dir)?;

    let bins_path = out_dir.join("binary_bins.bedgraph");
    write_binary_bedgraph(&input.binarized.labels, &bins_path)?;

    let summary = build_summary(input);
    let summary_path = out_dir.join("summary.json");
    write_text(&summary_path, &render_summary_json(&summary)?)?;

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &render_report_text(&summary))?;

    tracing::info!("wrote reports to {}", out_dir.display());
    Ok(())
}

pub fn build_summary(input: &Stage6Input<'_>) -> SummaryData {
    let b = input.binarized;
    let dist = &b.cutoff.estimator;
    let scores = dist.scores();

    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        input: input.input.clone(),
        reads: input.reads.clone(),
        cutoff: CutoffSummary {
            optimizer: input.optimizer.to_string(),
            optimal_limit: b.cutoff.limit_value,
            optimal_ratio: b.cutoff.ratio,
            max_ratio: input.max_ratio,
            threshold: b.selection.threshold,
            path: b.selection.path,
            warnings: b.selection.warnings.clone(),
        },
        bins: BinSummary {
            n_chroms: b.labels.chroms.len(),
            n_runs: b.n_runs,
            n_bins: b.labels.n_bins(),
            n_enriched: b.labels.n_enriched(),
            enriched_fraction: b.labels.enriched_fraction(),
        },
        scores: ScoreSummary {
            n_scores: scores.len(),
            min: scores.first().copied(),
            p10: dist.quantile(0.10),
            median: dist.quantile(0.50),
            p90: dist.quantile(0.90),
            max: scores.last().copied(),
        },
    }
}

/// One `chrom start end label` line per bin, runs in genome order.
fn write_binary_bedgraph(labels: &BinaryGenomeBins, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "track type=bedGraph name=edd_binary")?;
    for chrom in &labels.chroms {
        for bin in chrom.runs.iter().flatten() {
            writeln!(
                w,
                "{}\t{}\t{}\t{}",
                chrom.chrom,
                bin.start,
                bin.end,
                bin.label.as_i8()
            )?;
        }
    }
    w.flush()
}

fn write_text(path: &Path, text: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(text.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
