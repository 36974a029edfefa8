pub mod bins;
pub mod cutoff;
pub mod gaps;
pub mod labels;
pub mod params;
pub mod size;
