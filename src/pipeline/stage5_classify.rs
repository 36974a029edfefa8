use crate::model::bins::GenomeBins;
use crate::model::labels::{BinLabel, BinaryGenomeBins, LabeledBin, LabeledChrom};

pub fn genome_bins_as_binary(genome_bins: &GenomeBins, threshold: f64) -> BinaryGenomeBins {
    let chroms = genome_bins
        .chroms
        .iter()
        .map(|c| LabeledChrom {
            chrom: c.chrom.clone(),
            runs: c
                .runs
                .iter()
                .map(|run| {
                    run.iter()
                        .map(|b| LabeledBin {
                            start: b.start,
                            end: b.end,
                            label: BinLabel::from_score(b.score, threshold),
                        })
                        .collect()
                })
                .collect(),
        })
        .collect();
    BinaryGenomeBins { chroms }
}
