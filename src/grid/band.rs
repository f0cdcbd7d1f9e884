//! Channel band computation.
//!
//! A channel is `slices` × 12.5 GHz wide. Band edges sit on the 12.5 GHz grid
//! and the centre on the 6.25 GHz grid.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::mapping::WavelengthTable;
use super::units::parse_center;
use super::{normalize_slices, round5, snap, width_ghz, width_thz, GridError, STEP_12_5, STEP_6_25};

/// A planned channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub slices: u32,
    /// Lower edge in THz
    pub start_thz: Decimal,
    /// Upper edge in THz
    pub end_thz: Decimal,
    pub center_thz: Decimal,
    pub center_nm: Decimal,
    pub width_ghz: Decimal,
}

/// Place a channel around a centre given in nm or THz.
pub fn by_center(slices: i64, value: &str, table: &WavelengthTable) -> Result<Channel, GridError> {
    let slices = normalize_slices(slices);
    let center = parse_center(value, table)?;

    let half = width_thz(slices) / dec!(2);
    let start = snap(checked(center.checked_sub(half), center)?, STEP_12_5)?;
    let end = snap(checked(center.checked_add(half), center)?, STEP_12_5)?;

    Ok(Channel {
        slices,
        start_thz: round5(start),
        end_thz: round5(end),
        center_thz: round5(center),
        center_nm: table.thz_to_nm(center)?,
        width_ghz: width_ghz(slices),
    })
}

/// Lay a channel out upwards from a start frequency in THz.
pub fn from_start(
    slices: i64,
    start_thz: Decimal,
    table: &WavelengthTable,
) -> Result<Channel, GridError> {
    let slices = normalize_slices(slices);

    let start = snap(start_thz, STEP_12_5)?;
    let end = snap(checked(start.checked_add(width_thz(slices)), start)?, STEP_12_5)?;
    let center = snap((start + end) / dec!(2), STEP_6_25)?;

    Ok(Channel {
        slices,
        start_thz: round5(start),
        end_thz: round5(end),
        center_thz: round5(center),
        center_nm: table.thz_to_nm(center)?,
        width_ghz: width_ghz(slices),
    })
}

fn checked(result: Option<Decimal>, input: Decimal) -> Result<Decimal, GridError> {
    result.ok_or_else(|| GridError::OutOfRange(input.to_string()))
}
