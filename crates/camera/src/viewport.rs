use foundation::{GeoBounds, GeoPosition, Insets};
use runtime::Metrics;
use tracing::debug;

use crate::handle::MapCamera;
use crate::options::{CameraOptions, CameraTarget};

pub const METRIC_EASE_TO_POINT: &str = "camera.ease_to_point";
pub const METRIC_EASE_TO_BOUNDS: &str = "camera.ease_to_bounds";
pub const METRIC_DROPPED: &str = "camera.dropped";
pub const METRIC_EMPTY_FIT: &str = "camera.empty_fit";

/// Owns the (possibly not yet available) map camera.
///
/// Every command is fire-and-forget: with no camera attached it is dropped,
/// never queued and never reported as an error. The returned `bool` only says
/// whether a command reached the camera.
#[derive(Debug)]
pub struct ViewportController<C> {
    camera: Option<C>,
    metrics: Metrics,
}

impl<C> Default for ViewportController<C> {
    fn default() -> Self {
        Self {
            camera: None,
            metrics: Metrics::new(),
        }
    }
}

impl<C: MapCamera> ViewportController<C> {
    /// A controller whose map has not finished initializing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(camera: C) -> Self {
        Self {
            camera: Some(camera),
            metrics: Metrics::new(),
        }
    }

    /// Makes `camera` the live handle, returning the previous one.
    pub fn attach(&mut self, camera: C) -> Option<C> {
        self.camera.replace(camera)
    }

    pub fn detach(&mut self) -> Option<C> {
        self.camera.take()
    }

    pub fn is_attached(&self) -> bool {
        self.camera.is_some()
    }

    pub fn camera(&self) -> Option<&C> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut C> {
        self.camera.as_mut()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn current_zoom(&self) -> Option<f64> {
        self.camera.as_ref().map(|c| c.zoom())
    }

    /// Centers on `center`; `zoom: None` keeps the current zoom.
    pub fn ease_to_point(&mut self, center: GeoPosition, zoom: Option<f64>) -> bool {
        let Some(camera) = self.camera.as_mut() else {
            self.metrics.inc_counter(METRIC_DROPPED);
            debug!("ease_to_point dropped: no camera");
            return false;
        };
        let zoom = zoom.unwrap_or_else(|| camera.zoom());
        camera.ease_to(CameraOptions::center(center).with_zoom(zoom));
        self.metrics.inc_counter(METRIC_EASE_TO_POINT);
        debug!(
            lat = center.latitude,
            lon = center.longitude,
            zoom,
            "ease_to_point"
        );
        true
    }

    /// Frames `bounds` with `padding`, keeping the map north-up and flat.
    pub fn ease_to_bounds(&mut self, bounds: &GeoBounds, padding: Insets) -> bool {
        let Some(camera) = self.camera.as_mut() else {
            self.metrics.inc_counter(METRIC_DROPPED);
            debug!("ease_to_bounds dropped: no camera");
            return false;
        };
        let Some(options) = camera.camera_for_bounds(bounds, padding) else {
            self.metrics.inc_counter(METRIC_EMPTY_FIT);
            debug!(?bounds, "ease_to_bounds skipped: no camera fits region");
            return false;
        };
        camera.ease_to(options.north_up());
        self.metrics.inc_counter(METRIC_EASE_TO_BOUNDS);
        debug!(?bounds, zoom = ?options.zoom, "ease_to_bounds");
        true
    }

    pub fn ease_to_target(&mut self, target: &CameraTarget) -> bool {
        match *target {
            CameraTarget::Center { center, zoom } => self.ease_to_point(center, zoom),
            CameraTarget::Region { bounds, padding } => self.ease_to_bounds(&bounds, padding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{METRIC_DROPPED, METRIC_EASE_TO_BOUNDS, METRIC_EMPTY_FIT, ViewportController};
    use crate::mercator_camera::MercatorCamera;
    use crate::options::CameraTarget;
    use crate::recording::RecordingCamera;
    use foundation::{GeoBounds, GeoPosition, Insets};
    use pretty_assertions::assert_eq;

    fn camera() -> RecordingCamera<MercatorCamera> {
        RecordingCamera::new(MercatorCamera::new(
            GeoPosition::new(-6.05, 106.8),
            11.0,
            [800.0, 600.0],
        ))
    }

    #[test]
    fn detached_controller_drops_commands() {
        let mut vp: ViewportController<RecordingCamera<MercatorCamera>> = ViewportController::new();
        assert_eq!(vp.current_zoom(), None);
        assert!(!vp.ease_to_point(GeoPosition::new(1.0, 2.0), None));
        assert!(!vp.ease_to_bounds(&GeoBounds::new(0.0, 0.0, 1.0, 1.0), Insets::uniform(10.0)));
        assert_eq!(vp.metrics().counter(METRIC_DROPPED), 2);
    }

    #[test]
    fn point_ease_preserves_current_zoom() {
        let mut vp = ViewportController::with_camera(camera());
        assert!(vp.ease_to_point(GeoPosition::new(-6.07, 106.79), None));

        let cmds = vp.camera().unwrap().commands();
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].center, Some(GeoPosition::new(-6.07, 106.79)));
        assert_eq!(cmds[0].zoom, Some(11.0));
    }

    #[test]
    fn explicit_zoom_is_forwarded() {
        let mut vp = ViewportController::with_camera(camera());
        vp.ease_to_point(GeoPosition::new(0.0, 0.0), Some(4.0));
        assert_eq!(vp.camera().unwrap().commands()[0].zoom, Some(4.0));
    }

    #[test]
    fn bounds_ease_is_north_up() {
        let mut vp = ViewportController::with_camera(camera());
        let bounds = GeoBounds::new(106.79, -6.07, 106.84, -6.02);
        assert!(vp.ease_to_bounds(&bounds, Insets::uniform(10.0)));

        let cmd = *vp.camera().unwrap().last_command().unwrap();
        assert_eq!(cmd.bearing, Some(0.0));
        assert_eq!(cmd.pitch, Some(0.0));
        assert_eq!(vp.metrics().counter(METRIC_EASE_TO_BOUNDS), 1);
    }

    #[test]
    fn unfittable_region_issues_nothing() {
        let mut vp = ViewportController::with_camera(camera());
        let bounds = GeoBounds::new(106.79, -6.07, 106.84, -6.02);
        assert!(!vp.ease_to_bounds(&bounds, Insets::uniform(1_000.0)));
        assert!(vp.camera().unwrap().commands().is_empty());
        assert_eq!(vp.metrics().counter(METRIC_EMPTY_FIT), 1);
    }

    #[test]
    fn target_dispatch() {
        let mut vp = ViewportController::with_camera(camera());
        vp.ease_to_target(&CameraTarget::Center {
            center: GeoPosition::new(1.0, 1.0),
            zoom: None,
        });
        vp.ease_to_target(&CameraTarget::Region {
            bounds: GeoBounds::new(0.0, 0.0, 1.0, 1.0),
            padding: Insets::uniform(10.0),
        });
        assert_eq!(vp.camera().unwrap().commands().len(), 2);
    }

    #[test]
    fn attach_makes_commands_land() {
        let mut vp = ViewportController::new();
        assert!(!vp.ease_to_point(GeoPosition::new(1.0, 1.0), None));
        assert!(vp.attach(camera()).is_none());
        assert!(vp.ease_to_point(GeoPosition::new(1.0, 1.0), None));
        assert_eq!(vp.detach().unwrap().commands().len(), 1);
        assert!(!vp.is_attached());
    }
}
