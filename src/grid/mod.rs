//! Flexible DWDM grid arithmetic (ITU-T G.694.1).
//!
//! All frequencies are in THz and carried as `Decimal` so that snapping to the
//! 12.5 GHz and 6.25 GHz grids is exact. Rounding follows "half away from
//! zero" everywhere, which is what operators expect from a calculator.
//!
//! - [`mapping`]: optional nm/THz lookup table loaded from the data directory
//! - [`units`]: centre value parsing with nm/THz auto-detection
//! - [`band`]: channel band computation from a centre or a start frequency

pub mod band;
pub mod mapping;
pub mod units;

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

pub use band::{by_center, from_start, Channel};
pub use mapping::{MappingError, WavelengthTable};
pub use units::parse_center;

/// Band edge grid and slice width: 12.5 GHz
pub const STEP_12_5: Decimal = dec!(0.0125);

/// Centre frequency grid: 6.25 GHz
pub const STEP_6_25: Decimal = dec!(0.00625);

/// Speed of light in nm·THz (c / λ gives THz when λ is in nm)
pub const SPEED_OF_LIGHT: Decimal = dec!(299792.458);

/// Width of one slice in GHz
pub const SLICE_WIDTH_GHZ: Decimal = dec!(12.5);

/// Decimal places kept in every reported value
pub const OUTPUT_DECIMALS: u32 = 5;

/// Values at or above this are read as nanometres when no unit is given
pub const NM_AUTODETECT_THRESHOLD: Decimal = dec!(1000);

/// Slice count for the wide channel; every other request uses the default
pub const WIDE_SLICES: u32 = 7;

/// Default slice count
pub const DEFAULT_SLICES: u32 = 6;

/// Errors produced by grid calculations.
///
/// All of them are caused by the caller's input and map to 422 responses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("No numeric centre value found")]
    MissingNumber,

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("{0} must be positive")]
    NonPositive(&'static str),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}

/// Snap a frequency to the nearest point of a grid with the given step.
pub fn snap(value: Decimal, step: Decimal) -> Result<Decimal, GridError> {
    let points = value
        .checked_div(step)
        .ok_or_else(|| GridError::OutOfRange(value.to_string()))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    points
        .checked_mul(step)
        .ok_or_else(|| GridError::OutOfRange(value.to_string()))
}

/// Round to the reported precision, half away from zero.
pub fn round5(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(OUTPUT_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Only 6 and 7 slices are offered; anything other than 7 means 6.
pub fn normalize_slices(slices: i64) -> u32 {
    if slices == i64::from(WIDE_SLICES) {
        WIDE_SLICES
    } else {
        DEFAULT_SLICES
    }
}

/// Channel width in THz for the given slice count.
pub fn width_thz(slices: u32) -> Decimal {
    width_ghz(slices) / dec!(1000)
}

/// Channel width in GHz for the given slice count.
pub fn width_ghz(slices: u32) -> Decimal {
    SLICE_WIDTH_GHZ * Decimal::from(slices)
}

/// Divide the speed of light by a positive wavelength or frequency.
///
/// The same formula converts nm to THz and THz to nm.
pub(crate) fn light_ratio(value: Decimal, what: &'static str) -> Result<Decimal, GridError> {
    if value <= Decimal::ZERO {
        return Err(GridError::NonPositive(what));
    }
    SPEED_OF_LIGHT
        .checked_div(value)
        .ok_or_else(|| GridError::OutOfRange(value.to_string()))
}

/// Convert a JSON number to an exact decimal via its shortest text form.
///
/// `193.05_f64` becomes exactly `193.05`, not the nearest binary value.
pub fn decimal_from_f64(value: f64) -> Result<Decimal, GridError> {
    if !value.is_finite() {
        return Err(GridError::InvalidNumber(value.to_string()));
    }
    let text = value.to_string();
    Decimal::from_str(&text).map_err(|_| GridError::OutOfRange(text))
}

/// Convert for JSON output. Every value here is well inside f64 range.
pub(crate) fn as_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_12_5_grid() {
        assert_eq!(snap(dec!(193.1), STEP_12_5).unwrap(), dec!(193.1));
        assert_eq!(snap(dec!(193.106), STEP_12_5).unwrap(), dec!(193.1));
        assert_eq!(snap(dec!(193.107), STEP_12_5).unwrap(), dec!(193.1125));
    }

    #[test]
    fn test_snap_midpoint_rounds_up() {
        // 193.36875 is exactly half way between 193.3625 and 193.375
        assert_eq!(snap(dec!(193.36875), STEP_12_5).unwrap(), dec!(193.375));
        assert_eq!(snap(dec!(193.003125), STEP_6_25).unwrap(), dec!(193.00625));
    }

    #[test]
    fn test_snap_negative_midpoint_rounds_away_from_zero() {
        assert_eq!(snap(dec!(-0.00625), STEP_12_5).unwrap(), dec!(-0.0125));
    }

    #[test]
    fn test_snap_overflow_is_an_error() {
        let err = snap(Decimal::MAX, STEP_6_25).unwrap_err();
        assert!(matches!(err, GridError::OutOfRange(_)));
    }

    #[test]
    fn test_round5() {
        assert_eq!(round5(dec!(1550.015940024558909)), dec!(1550.01594));
        assert_eq!(round5(dec!(1.000005)), dec!(1.00001));
        assert_eq!(round5(dec!(193.10000)).to_string(), "193.1");
    }

    #[test]
    fn test_normalize_slices() {
        assert_eq!(normalize_slices(7), 7);
        assert_eq!(normalize_slices(6), 6);
        assert_eq!(normalize_slices(0), 6);
        assert_eq!(normalize_slices(8), 6);
        assert_eq!(normalize_slices(-7), 6);
    }

    #[test]
    fn test_widths() {
        assert_eq!(width_ghz(6), dec!(75));
        assert_eq!(width_ghz(7), dec!(87.5));
        assert_eq!(width_thz(6), dec!(0.075));
        assert_eq!(width_thz(7), dec!(0.0875));
    }

    #[test]
    fn test_decimal_from_f64_is_exact() {
        assert_eq!(decimal_from_f64(193.05).unwrap().to_string(), "193.05");
        assert_eq!(decimal_from_f64(-0.5).unwrap(), dec!(-0.5));
        assert!(matches!(
            decimal_from_f64(1e300),
            Err(GridError::OutOfRange(_))
        ));
        assert!(matches!(
            decimal_from_f64(f64::NAN),
            Err(GridError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_light_ratio_rejects_zero() {
        assert_eq!(
            light_ratio(Decimal::ZERO, "Wavelength"),
            Err(GridError::NonPositive("Wavelength"))
        );
    }
}
