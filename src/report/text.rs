use std::fmt::Write;

use crate::pipeline::stage4_select::SelectionPath;
use crate::report::{SummaryData, format_f64_4, format_opt_f64_4};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Enriched Domain Binarization Report\n");
    out.push_str("===================================\n\n");

    out.push_str("1. Input\n");
    let _ = writeln!(out, "Mode: {}", data.input.mode);
    for (role, path) in &data.input.sources {
        let _ = writeln!(out, "{}: {}", role, path);
    }
    if let Some(bin_size) = data.input.bin_size {
        let _ = writeln!(out, "Bin size: {} bp", bin_size);
    }
    if let Some(normalize) = data.input.normalize {
        let _ = writeln!(out, "Normalize control: {}", if normalize { "yes" } else { "no" });
    }
    if let Some(kind) = data.input.score_function {
        let _ = writeln!(out, "Score function: {:?}", kind);
    }
    match &data.input.gaps {
        Some(path) => {
            let _ = writeln!(
                out,
                "Gaps: {} ({} regions, ignoring gaps < {} bp)",
                path, data.input.n_gaps, data.input.drop_gaps_smaller_than
            );
        }
        None => out.push_str("Gaps: none\n"),
    }
    if let Some(reads) = &data.reads {
        let _ = writeln!(
            out,
            "Reads counted: IP {} / control {} (control scale {})",
            reads.ip.counted,
            reads.control.counted,
            format_f64_4(reads.control_scale)
        );
    }
    out.push('\n');

    out.push_str("2. Cutoff\n");
    let _ = writeln!(out, "Optimizer: {}", data.cutoff.optimizer);
    let _ = writeln!(
        out,
        "Optimal limit: {} (ratio {})",
        format_f64_4(data.cutoff.optimal_limit),
        format_f64_4(data.cutoff.optimal_ratio)
    );
    let _ = writeln!(out, "Max ratio: {}", format_f64_4(data.cutoff.max_ratio));
    let _ = writeln!(
        out,
        "Threshold used: {} ({})",
        format_f64_4(data.cutoff.threshold),
        match data.cutoff.path {
            SelectionPath::Optimal => "optimal",
            SelectionPath::Fallback => "ratio-bounded fallback",
        }
    );
    for warning in &data.cutoff.warnings {
        let _ = writeln!(out, "WARNING: {}", warning);
    }
    out.push('\n');

    out.push_str("3. Bins\n");
    let _ = writeln!(
        out,
        "{} bins in {} runs on {} chromosomes",
        data.bins.n_bins, data.bins.n_runs, data.bins.n_chroms
    );
    let _ = writeln!(
        out,
        "Enriched: {} ({})",
        data.bins.n_enriched,
        format_f64_4(data.bins.enriched_fraction)
    );
    let _ = writeln!(
        out,
        "Scores: min {}, p10 {}, median {}, p90 {}, max {}",
        format_opt_f64_4(data.scores.min),
        format_opt_f64_4(data.scores.p10),
        format_opt_f64_4(data.scores.median),
        format_opt_f64_4(data.scores.p90),
        format_opt_f64_4(data.scores.max)
    );
    out
}
