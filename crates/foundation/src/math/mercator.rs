//! Spherical Web Mercator in normalized world units.
//!
//! `x` grows eastward from 0 at -180° to 1 at +180°, `y` grows southward from
//! 0 at the northern clamp latitude to 1 at the southern one. Multiplying by
//! `TILE_SIZE * 2^zoom` yields pixels at that zoom.

use std::f64::consts::PI;

/// Latitude where the square Mercator world ends.
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_779_806_59;

/// Pixel size of one tile at zoom 0 (vector tile convention).
pub const TILE_SIZE: f64 = 512.0;

pub fn clamp_lat_deg(lat_deg: f64) -> f64 {
    lat_deg.clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG)
}

pub fn wrap_lon_deg(lon_deg: f64) -> f64 {
    (lon_deg + 180.0).rem_euclid(360.0) - 180.0
}

pub fn mercator_x(lon_deg: f64) -> f64 {
    (180.0 + lon_deg) / 360.0
}

pub fn mercator_y(lat_deg: f64) -> f64 {
    let lat = clamp_lat_deg(lat_deg).to_radians();
    (180.0 - (180.0 / PI) * (PI / 4.0 + lat / 2.0).tan().ln()) / 360.0
}

pub fn lon_from_mercator_x(x: f64) -> f64 {
    x * 360.0 - 180.0
}

pub fn lat_from_mercator_y(y: f64) -> f64 {
    let y2 = 180.0 - y * 360.0;
    (360.0 / PI) * (y2 * PI / 180.0).exp().atan() - 90.0
}

/// World size in pixels at `zoom`.
pub fn world_size_px(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}
