use std::collections::HashMap;
use std::path::Path;

use crate::input::{InputError, for_each_record, parse_coord};

/// Chromosome lengths in file order.
#[derive(Debug, Clone, Default)]
pub struct ChromSizes {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl ChromSizes {
    pub fn insert(&mut self, chrom: &str, size: u64) -> bool {
        if self.index.contains_key(chrom) {
            return false;
        }
        self.index.insert(chrom.to_string(), self.entries.len());
        self.entries.push((chrom.to_string(), size));
        true
    }

    pub fn get(&self, chrom: &str) -> Option<(usize, u64)> {
        self.index.get(chrom).map(|&idx| (idx, self.entries[idx].1))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(c, s)| (c.as_str(), *s))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn parse_chrom_sizes(path: &Path) -> Result<ChromSizes, InputError> {
    let mut sizes = ChromSizes::default();
    for_each_record(path, |line_no, fields| {
        if fields.len() < 2 {
            return Err(InputError::Parse(format!(
                "{} line {} has <2 columns",
                path.display(),
                line_no
            )));
        }
        let size = parse_coord(fields[1], "chromosome size", path, line_no)?;
        if !sizes.insert(fields[0], size) {
            return Err(InputError::Parse(format!(
                "{} line {}: duplicate chromosome {}",
                path.display(),
                line_no,
                fields[0]
            )));
        }
        Ok(())
    })?;

    if sizes.is_empty() {
        return Err(InputError::InvalidInput(format!(
            "chromosome sizes file {} is empty",
            path.display()
        )));
    }
    Ok(sizes)
}
