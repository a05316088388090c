use serde::{Deserialize, Serialize};

use crate::coords::GeoPosition;

/// Axis-aligned lon/lat rectangle.
///
/// No antimeridian handling: a set spanning ±180° produces a box that wraps
/// the long way round.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GeoBounds {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Minimal box covering `positions`; `None` for an empty input.
    ///
    /// Non-finite coordinates are skipped.
    pub fn from_positions<'a, I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoPosition>,
    {
        let mut out: Option<Self> = None;
        for p in positions {
            if !p.latitude.is_finite() || !p.longitude.is_finite() {
                continue;
            }
            out = Some(match out {
                None => Self::new(p.longitude, p.latitude, p.longitude, p.latitude),
                Some(b) => b.extend(*p),
            });
        }
        out
    }

    pub fn extend(self, p: GeoPosition) -> Self {
        Self {
            min_lon: self.min_lon.min(p.longitude),
            min_lat: self.min_lat.min(p.latitude),
            max_lon: self.max_lon.max(p.longitude),
            max_lat: self.max_lat.max(p.latitude),
        }
    }

    pub fn contains(&self, p: GeoPosition) -> bool {
        p.longitude >= self.min_lon
            && p.longitude <= self.max_lon
            && p.latitude >= self.min_lat
            && p.latitude <= self.max_lat
    }

    pub fn center(&self) -> GeoPosition {
        GeoPosition::new(
            (self.min_lat + self.max_lat) * 0.5,
            (self.min_lon + self.max_lon) * 0.5,
        )
    }

    pub fn width_deg(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height_deg(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// All covered points coincide.
    pub fn is_degenerate(&self) -> bool {
        self.width_deg() == 0.0 && self.height_deg() == 0.0
    }

    /// South-west and north-east corners.
    pub fn corners(&self) -> (GeoPosition, GeoPosition) {
        (
            GeoPosition::new(self.min_lat, self.min_lon),
            GeoPosition::new(self.max_lat, self.max_lon),
        )
    }
}

/// Screen-space padding in logical pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Insets {
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            bottom: v,
            left: v,
            right: v,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::{GeoBounds, Insets};
    use crate::coords::GeoPosition;

    #[test]
    fn empty_input_has_no_bounds() {
        assert!(GeoBounds::from_positions(&[] as &[GeoPosition]).is_none());
    }

    #[test]
    fn covers_all_points_exactly() {
        let a = GeoPosition::new(-6.07, 106.79);
        let b = GeoPosition::new(-6.02, 106.84);
        let bounds = GeoBounds::from_positions(&[a, b]).unwrap();
        assert_eq!(bounds, GeoBounds::new(106.79, -6.07, 106.84, -6.02));
        assert!(bounds.contains(a));
        assert!(bounds.contains(b));
        assert!(!bounds.contains(GeoPosition::new(-6.08, 106.8)));
    }

    #[test]
    fn single_point_is_degenerate() {
        let p = GeoPosition::new(1.5, 2.5);
        let bounds = GeoBounds::from_positions(&[p, p]).unwrap();
        assert!(bounds.is_degenerate());
        assert_eq!(bounds.center(), p);
    }

    #[test]
    fn skips_non_finite_points() {
        let bounds = GeoBounds::from_positions(&[
            GeoPosition::new(f64::NAN, 10.0),
            GeoPosition::new(1.0, 2.0),
        ])
        .unwrap();
        assert_eq!(bounds, GeoBounds::new(2.0, 1.0, 2.0, 1.0));
    }

    #[test]
    fn thin_box_is_not_degenerate() {
        let bounds = GeoBounds::new(10.0, 5.0, 12.0, 5.0);
        assert!(!bounds.is_degenerate());
        assert_eq!(bounds.width_deg(), 2.0);
        assert_eq!(bounds.height_deg(), 0.0);
    }

    #[test]
    fn uniform_insets() {
        let pad = Insets::uniform(10.0);
        assert_eq!(pad.horizontal(), 20.0);
        assert_eq!(pad.vertical(), 20.0);
    }
}
