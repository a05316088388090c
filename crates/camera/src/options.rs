use foundation::{GeoBounds, GeoPosition, Insets};
use serde::{Deserialize, Serialize};

/// Argument to [`MapCamera::ease_to`](crate::MapCamera::ease_to).
///
/// `None` fields keep the camera's current value.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<GeoPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
}

impl CameraOptions {
    pub fn center(center: GeoPosition) -> Self {
        Self {
            center: Some(center),
            ..Self::default()
        }
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Pins the map to a north-up, top-down view.
    pub fn north_up(mut self) -> Self {
        self.bearing = Some(0.0);
        self.pitch = Some(0.0);
        self
    }
}

/// Where a one-shot framing command should send the camera.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraTarget {
    /// Center on a point; `zoom: None` keeps the current zoom.
    Center {
        center: GeoPosition,
        zoom: Option<f64>,
    },
    /// Frame a region with screen-space padding.
    Region { bounds: GeoBounds, padding: Insets },
}
