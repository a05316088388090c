use serde::{Deserialize, Serialize};

/// Fixed-point scale of transmitted coordinates (degrees × 10⁷).
pub const MICRO_DEGREE_SCALE: f64 = 1e7;

/// Coordinate as transmitted by a device, in integer units of 1e-7 degrees.
///
/// Either field may be missing from the wire message.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawPosition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude_i: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude_i: Option<i32>,
}

impl RawPosition {
    pub const fn new(latitude_i: i32, longitude_i: i32) -> Self {
        Self {
            latitude_i: Some(latitude_i),
            longitude_i: Some(longitude_i),
        }
    }

    /// True when the latitude field is present and non-zero.
    ///
    /// A zero latitude is how firmware reports "no fix yet".
    pub fn has_fix(&self) -> bool {
        self.latitude_i.is_some_and(|v| v != 0)
    }

    pub fn to_geo(&self) -> GeoPosition {
        to_geo_position(Some(self))
    }
}

/// Display-ready coordinate in floating-point degrees.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `[lon, lat]` order, as map libraries expect.
    pub fn lon_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Converts a fixed-point position into degrees.
///
/// Missing input or missing fields are treated as exactly 0°. No range
/// validation happens here; out-of-range values pass through unchanged.
pub fn to_geo_position(raw: Option<&RawPosition>) -> GeoPosition {
    let (lat_i, lon_i) = match raw {
        Some(r) => (r.latitude_i.unwrap_or(0), r.longitude_i.unwrap_or(0)),
        None => (0, 0),
    };
    GeoPosition {
        latitude: f64::from(lat_i) / MICRO_DEGREE_SCALE,
        longitude: f64::from(lon_i) / MICRO_DEGREE_SCALE,
    }
}
