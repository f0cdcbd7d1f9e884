//! Channel calculation endpoints.
//!
//! Both endpoints return the same shape:
//! `{"slices", "band": [start, end], "center_thz", "center_nm", "width_ghz"}`
//! with all frequencies in THz.

use axum::{extract::State, Json};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::instrument;

use crate::error::AppError;
use crate::grid::{self, as_f64, Channel};
use crate::routes::extract::AppJson;
use crate::state::AppState;

/// Body of `POST /calc_center`.
#[derive(Debug, Deserialize)]
pub struct CalcByCenter {
    #[serde(deserialize_with = "slice_count")]
    pub slices: i64,
    /// Centre as typed by the user; the unit is auto-detected
    pub value: String,
}

/// Body of `POST /calc_from_start`.
#[derive(Debug, Deserialize)]
pub struct CalcByStart {
    #[serde(deserialize_with = "slice_count")]
    pub slices: i64,
    #[serde(deserialize_with = "frequency")]
    pub start_thz: f64,
}

/// Browsers and scripts send numbers both bare and quoted.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(Number),
    Text(String),
}

/// Integral value of a float, saturating past the `i64` range.
fn integral(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}

/// Accept `7`, `7.0`, `"7"` or any integer, however large.
///
/// Only 7 is significant, so integers outside `i64` saturate and
/// end up as the default slice count.
fn slice_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let parsed = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => match n.as_i64() {
            Some(v) => Some(v),
            None if n.is_u64() => Some(i64::MAX),
            None => n.as_f64().and_then(integral),
        },
        NumberOrText::Text(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(integral))
        }
    };
    parsed.ok_or_else(|| de::Error::custom("slices must be a whole number"))
}

/// Accept a JSON number or a numeric string.
fn frequency<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let parsed = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n.as_f64(),
        NumberOrText::Text(text) => text.trim().parse::<f64>().ok(),
    };
    parsed.ok_or_else(|| de::Error::custom("start_thz must be a number"))
}

#[derive(Debug, Serialize)]
pub struct ChannelResponse {
    pub slices: u32,
    pub band: [f64; 2],
    pub center_thz: f64,
    pub center_nm: f64,
    pub width_ghz: f64,
}

impl From<Channel> for ChannelResponse {
    fn from(channel: Channel) -> Self {
        Self {
            slices: channel.slices,
            band: [as_f64(channel.start_thz), as_f64(channel.end_thz)],
            center_thz: as_f64(channel.center_thz),
            center_nm: as_f64(channel.center_nm),
            width_ghz: as_f64(channel.width_ghz),
        }
    }
}

/// Place a channel around a centre frequency or wavelength.
#[instrument(name = "calc::center", skip(state))]
pub async fn center(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CalcByCenter>,
) -> Result<Json<ChannelResponse>, AppError> {
    let table = state.table.read().await;
    let channel = grid::by_center(payload.slices, &payload.value, &table)?;

    tracing::debug!(
        center_thz = %channel.center_thz,
        start_thz = %channel.start_thz,
        end_thz = %channel.end_thz,
        "Computed channel from centre"
    );
    Ok(Json(channel.into()))
}

/// Lay a channel out from its lower band edge.
#[instrument(name = "calc::from_start", skip(state))]
pub async fn from_start(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CalcByStart>,
) -> Result<Json<ChannelResponse>, AppError> {
    let start = grid::decimal_from_f64(payload.start_thz)?;
    let table = state.table.read().await;
    let channel = grid::from_start(payload.slices, start, &table)?;

    tracing::debug!(
        center_thz = %channel.center_thz,
        start_thz = %channel.start_thz,
        end_thz = %channel.end_thz,
        "Computed channel from start"
    );
    Ok(Json(channel.into()))
}
