use std::path::Path;

use serde::Serialize;

use crate::input::chrom_sizes::ChromSizes;
use crate::input::reads::for_each_read;
use crate::input::InputError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadTally {
    pub counted: u64,
    pub unknown_chrom: u64,
    pub out_of_bounds: u64,
}

/// Per-window read counts for one library, indexed like the chromosome
/// sizes table.
#[derive(Debug, Clone)]
pub struct LibraryCounts {
    pub windows: Vec<Vec<u32>>,
    pub tally: ReadTally,
}

#[derive(Debug, Clone)]
pub struct Experiment {
    pub chrom_sizes: ChromSizes,
    pub bin_size: u64,
    pub ip: LibraryCounts,
    pub control: LibraryCounts,
}

/// One row of an experiment's window table.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowCounts {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub ip: f64,
    pub control: f64,
}

pub fn load_experiment(
    ip_path: &Path,
    control_path: &Path,
    chrom_sizes: ChromSizes,
    bin_size: u64,
) -> Result<Experiment, InputError> {
    if bin_size == 0 {
        return Err(InputError::InvalidInput("bin size must be > 0".to_string()));
    }
    let ip = count_library(ip_path, &chrom_sizes, bin_size)?;
    let control = count_library(control_path, &chrom_sizes, bin_size)?;
    tracing::info!(
        "counted {} IP reads and {} control reads into {} bp windows",
        ip.tally.counted,
        control.tally.counted,
        bin_size
    );
    Ok(Experiment {
        chrom_sizes,
        bin_size,
        ip,
        control,
    })
}

/// Counts reads into windows by read midpoint.
pub fn count_library(
    path: &Path,
    chrom_sizes: &ChromSizes,
    bin_size: u64,
) -> Result<LibraryCounts, InputError> {
    let mut windows: Vec<Vec<u32>> = chrom_sizes
        .iter()
        .map(|(_, size)| vec![0u32; size.div_ceil(bin_size) as usize])
        .collect();
    let mut tally = ReadTally::default();

    for_each_read(path, |read| {
        let Some((idx, size)) = chrom_sizes.get(read.chrom) else {
            tally.unknown_chrom += 1;
            return;
        };
        let mid = read.midpoint();
        if mid >= size {
            tally.out_of_bounds += 1;
            return;
        }
        let w = (mid / bin_size) as usize;
        windows[idx][w] = windows[idx][w].saturating_add(1);
        tally.counted += 1;
    })?;

    if tally.unknown_chrom > 0 || tally.out_of_bounds > 0 {
        tracing::warn!(
            "{}: skipped {} reads on unknown chromosomes and {} past chromosome ends",
            path.display(),
            tally.unknown_chrom,
            tally.out_of_bounds
        );
    }
    if tally.counted == 0 {
        tracing::warn!("{}: no reads fell inside any window", path.display());
    }
    Ok(LibraryCounts { windows, tally })
}

impl Experiment {
    /// Factor applied to control counts so both libraries have the same
    /// depth. 1.0 when not normalizing or when either library is empty.
    pub fn control_scale(&self, normalize: bool) -> f64 {
        let ip = self.ip.tally.counted;
        let control = self.control.tally.counted;
        if !normalize || ip == 0 || control == 0 {
            return 1.0;
        }
        ip as f64 / control as f64
    }

    pub fn as_data_frame(&self, normalize: bool) -> Vec<WindowCounts> {
        let scale = self.control_scale(normalize);
        let mut rows = Vec::new();
        for (idx, (chrom, size)) in self.chrom_sizes.iter().enumerate() {
            let ip = &self.ip.windows[idx];
            let control = &self.control.windows[idx];
            for (w, (&ip_n, &ctl_n)) in ip.iter().zip(control.iter()).enumerate() {
                let start = w as u64 * self.bin_size;
                rows.push(WindowCounts {
                    chrom: chrom.to_string(),
                    start,
                    end: (start + self.bin_size).min(size),
                    ip: ip_n as f64,
                    control: ctl_n as f64 * scale,
                });
            }
        }
        rows
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_experiment.rs"]
mod tests;
