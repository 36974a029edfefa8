use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSizeError {
    #[error("invalid bin size: {0}")]
    Int(#[from] ParseIntError),
    #[error("bin size {0}kb does not fit in 64 bits")]
    Overflow(u64),
}

/// Parses a bin size such as `500` or `10kb` into base pairs.
///
/// Only the `kb` suffix (any case) is understood; `mb`, `bp` and friends
/// fall through to the plain integer parse and fail there.
pub fn parse_bin_size(s: &str) -> Result<u64, ParseSizeError> {
    let s = s.trim();
    let kb_prefix = s
        .len()
        .checked_sub(2)
        .filter(|&cut| cut > 0 && s.is_char_boundary(cut))
        .filter(|&cut| s[cut..].eq_ignore_ascii_case("kb"))
        .map(|cut| &s[..cut]);
    match kb_prefix {
        Some(prefix) => {
            let kb: u64 = prefix.parse()?;
            kb.checked_mul(1000).ok_or(ParseSizeError::Overflow(kb))
        }
        None => Ok(s.parse()?),
    }
}
