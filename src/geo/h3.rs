//! H3 cell encoding

use crate::column::Coord;
use crate::dispatch::{Broadcast, Dispatcher};
use crate::error::{ColHashError, Result};
use h3o::{LatLng, Resolution};

/// Resolution used when none is given
pub const DEFAULT_RESOLUTION: i64 = 12;

/// Finest H3 resolution
pub const MAX_RESOLUTION: i64 = 15;

fn to_resolution(value: i64) -> Option<Resolution> {
    u8::try_from(value)
        .ok()
        .and_then(|r| Resolution::try_from(r).ok())
}

/// Resolve a scalar resolution slot; absent or null means [`DEFAULT_RESOLUTION`]
pub fn scalar_resolution(slot: Option<Option<i64>>) -> Result<i64> {
    let value = slot.flatten().unwrap_or(DEFAULT_RESOLUTION);
    match to_resolution(value) {
        Some(_) => Ok(value),
        None => Err(ColHashError::config(format!(
            "expected resolution between 0 and {}, got {}",
            MAX_RESOLUTION, value
        ))),
    }
}

/// H3 cell containing `coord`, rendered as lowercase hex
pub fn encode(coord: Coord, resolution: Resolution) -> Result<String> {
    let latlng = LatLng::new(coord.latitude, coord.longitude)
        .map_err(|e| ColHashError::coordinate(coord.longitude, coord.latitude, e.to_string()))?;
    Ok(latlng.to_cell(resolution).to_string())
}

/// H3 cell of every non-null coordinate
pub fn encode_column(
    dispatcher: &Dispatcher,
    input: &[Option<Coord>],
    resolution: Broadcast<'_, i64>,
) -> Result<Vec<Option<String>>> {
    dispatcher.try_map_with_param(input, resolution, |coord, r| {
        let resolution = to_resolution(r).ok_or_else(|| {
            ColHashError::evaluation(format!(
                "expected resolution between 0 and {}, got {}",
                MAX_RESOLUTION, r
            ))
        })?;
        encode(*coord, resolution)
    })
}
