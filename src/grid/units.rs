//! Centre value parsing with unit auto-detection.
//!
//! Users paste whatever their planning sheet shows: `1550.12 nm`, `193.1THz`,
//! `193,1` or a bare `1550`. An explicit unit wins; otherwise values of 1000
//! and above are wavelengths and smaller values are frequencies.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use super::mapping::{parse_decimal, WavelengthTable};
use super::{round5, snap, GridError, NM_AUTODETECT_THRESHOLD, STEP_6_25};

static UNIT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(nm|thz)").expect("valid regex"));

static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([-+]?[0-9]+(?:[.,][0-9]+)?)").expect("valid regex"));

/// Unit of a parsed centre value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Nanometre,
    Terahertz,
}

/// Detect the unit named in the input, if any. The first mention wins.
pub fn unit_hint(raw: &str) -> Option<Unit> {
    let found = UNIT_PATTERN.find(raw)?;
    if found.as_str().eq_ignore_ascii_case("nm") {
        Some(Unit::Nanometre)
    } else {
        Some(Unit::Terahertz)
    }
}

/// Parse a centre value and return its frequency in THz on the 6.25 GHz grid.
pub fn parse_center(raw: &str, table: &WavelengthTable) -> Result<Decimal, GridError> {
    let raw = raw.trim();
    let hint = unit_hint(raw);

    let number = NUMBER_PATTERN
        .find(raw)
        .ok_or(GridError::MissingNumber)?
        .as_str();
    let value = parse_decimal(number).ok_or_else(|| GridError::InvalidNumber(number.to_string()))?;

    let unit = hint.unwrap_or(if value >= NM_AUTODETECT_THRESHOLD {
        Unit::Nanometre
    } else {
        Unit::Terahertz
    });

    match unit {
        Unit::Nanometre => table.nm_to_thz(value),
        Unit::Terahertz => Ok(round5(snap(value, STEP_6_25)?)),
    }
}
