//! Coordinate conversion module
//!
//! Converts geographic coordinates (latitude/longitude) to Web Mercator
//! tile indices in the slippy-map grid, and normalizes a bounding box into
//! the [`TileGrid`] of tiles covering it.

mod types;

pub use types::{
    CoordError, GeoBounds, GridRowIterator, GridTile, GridTilesIterator, TileCoord, TileGrid,
    MAX_LAT, MAX_LON, MAX_ZOOM, MIN_LAT, MIN_LON, MIN_ZOOM,
};

use std::f64::consts::PI;

/// Converts a longitude to a tile X index.
///
/// Pure projection with no bounds checking; see [`bounds_to_grid`] for the
/// validating entry point. `lon_to_tile_x(z, -180.0)` is 0 at every zoom.
#[inline]
pub fn lon_to_tile_x(zoom: u8, lon: f64) -> u32 {
    let n = 2.0_f64.powi(zoom as i32);
    ((lon + 180.0) / 360.0 * n).floor() as u32
}

/// Converts a latitude to a tile Y index.
///
/// Standard Web Mercator projection: `asinh(tan(lat))` is the closed form of
/// `ln(tan(lat) + sec(lat))`. Pure and unchecked; latitudes outside roughly
/// ±85° are meaningless here and must be rejected by the caller.
#[inline]
pub fn lat_to_tile_y(zoom: u8, lat: f64) -> u32 {
    let n = 2.0_f64.powi(zoom as i32);
    let lat_rad = lat * PI / 180.0;
    ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor() as u32
}

/// Maps a bounding box onto the tile grid at the given zoom level.
///
/// Validates both corners against the Web Mercator latitude range and the
/// longitude range, maps each corner to tile indices, and orders the result
/// so the grid origin is the north-west corner. Corners that land on the
/// same tile index along an axis produce a zero count on that axis (the
/// returned grid [`is_empty`](TileGrid::is_empty)).
///
/// # Arguments
///
/// * `bounds` - The two corner points, in either order
/// * `zoom` - Zoom level (0 to 19)
///
/// # Returns
///
/// The normalized [`TileGrid`], or a [`CoordError`] for out-of-range input.
pub fn bounds_to_grid(bounds: &GeoBounds, zoom: u8) -> Result<TileGrid, CoordError> {
    for lat in [bounds.from_lat, bounds.to_lat] {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
    }
    for lon in [bounds.from_lon, bounds.to_lon] {
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(CoordError::InvalidLongitude(lon));
        }
    }
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }

    let mut from_x = lon_to_tile_x(zoom, bounds.from_lon);
    let mut to_x = lon_to_tile_x(zoom, bounds.to_lon);
    let mut from_y = lat_to_tile_y(zoom, bounds.from_lat);
    let mut to_y = lat_to_tile_y(zoom, bounds.to_lat);

    if from_x > to_x {
        std::mem::swap(&mut from_x, &mut to_x);
    }
    if from_y > to_y {
        std::mem::swap(&mut from_y, &mut to_y);
    }

    Ok(TileGrid {
        origin_x: from_x,
        origin_y: from_y,
        width: to_x - from_x,
        height: to_y - from_y,
        zoom,
    })
}
