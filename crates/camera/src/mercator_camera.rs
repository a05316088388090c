//! Top-down Web Mercator camera with eased transitions.
//!
//! This is the in-process stand-in for the map library's camera: it answers
//! zoom queries, converts bounds to a camera, and animates `ease_to` requests
//! over a fixed duration. Pitch and bearing are locked at zero.

use foundation::math::{
    clamp_lat_deg, lat_from_mercator_y, lon_from_mercator_x, mercator_x, mercator_y,
    world_size_px, wrap_lon_deg,
};
use foundation::{GeoBounds, GeoPosition, Insets};
use serde::Serialize;

use crate::handle::MapCamera;
use crate::options::CameraOptions;

/// Default zoom limits of the tile renderer.
pub const DEFAULT_MIN_ZOOM: f64 = 0.0;
pub const DEFAULT_MAX_ZOOM: f64 = 22.0;

/// Default transition length for `ease_to` (seconds).
pub const DEFAULT_EASE_DURATION_S: f64 = 0.5;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct CameraState {
    pub center: GeoPosition,
    pub zoom: f64,
    pub bearing: f64,
    pub pitch: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Ease {
    from: [f64; 3],
    to: [f64; 3],
    elapsed_s: f64,
    duration_s: f64,
}

impl Ease {
    fn progress(&self) -> f64 {
        if self.duration_s <= 0.0 {
            return 1.0;
        }
        (self.elapsed_s / self.duration_s).clamp(0.0, 1.0)
    }

    /// Interpolated `[x, y, zoom]` in normalized mercator units.
    fn sample(&self) -> [f64; 3] {
        let t = ease_out_cubic(self.progress());
        [
            self.from[0] + (self.to[0] - self.from[0]) * t,
            self.from[1] + (self.to[1] - self.from[1]) * t,
            self.from[2] + (self.to[2] - self.from[2]) * t,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct MercatorCamera {
    center: GeoPosition,
    zoom: f64,
    viewport_px: [f64; 2],
    min_zoom: f64,
    max_zoom: f64,
    ease_duration_s: f64,
    ease: Option<Ease>,
}

impl MercatorCamera {
    pub fn new(center: GeoPosition, zoom: f64, viewport_px: [f64; 2]) -> Self {
        Self::with_limits(center, zoom, viewport_px, DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
    }

    /// Like [`new`](Self::new), but clamps the starting zoom against
    /// `min_zoom..=max_zoom` instead of the default range.
    pub fn with_limits(
        center: GeoPosition,
        zoom: f64,
        viewport_px: [f64; 2],
        min_zoom: f64,
        max_zoom: f64,
    ) -> Self {
        let (min_zoom, max_zoom) = sanitize_zoom_limits(min_zoom, max_zoom);
        let zoom = if zoom.is_finite() { zoom } else { min_zoom };
        Self {
            center: normalize_center(center),
            zoom: zoom.clamp(min_zoom, max_zoom),
            viewport_px: [viewport_px[0].max(1.0), viewport_px[1].max(1.0)],
            min_zoom,
            max_zoom,
            ease_duration_s: DEFAULT_EASE_DURATION_S,
            ease: None,
        }
    }

    /// Narrows the zoom range. Non-finite limits fall back to the defaults.
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        let (min_zoom, max_zoom) = sanitize_zoom_limits(min_zoom, max_zoom);
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
        self
    }

    pub fn with_ease_duration(mut self, duration_s: f64) -> Self {
        self.ease_duration_s = duration_s.max(0.0);
        self
    }

    pub fn viewport_size(&self) -> [f64; 2] {
        self.viewport_px
    }

    pub fn center(&self) -> GeoPosition {
        self.center
    }

    pub fn state(&self) -> CameraState {
        CameraState {
            center: self.center,
            zoom: self.zoom,
            bearing: 0.0,
            pitch: 0.0,
        }
    }

    /// Final state once the in-flight transition (if any) completes.
    pub fn target_state(&self) -> CameraState {
        match self.ease {
            Some(ease) => CameraState {
                center: GeoPosition::new(
                    lat_from_mercator_y(ease.to[1]),
                    lon_from_mercator_x(ease.to[0]),
                ),
                zoom: ease.to[2],
                bearing: 0.0,
                pitch: 0.0,
            },
            None => self.state(),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.ease.is_some()
    }

    /// Applies `options` immediately, cancelling any transition.
    pub fn jump_to(&mut self, options: CameraOptions) {
        self.ease = None;
        let (center, zoom) = self.resolve(options);
        self.center = center;
        self.zoom = zoom;
    }

    /// Advances the current transition.
    ///
    /// - `dt_s`: Time since the last update in seconds.
    pub fn update(&mut self, dt_s: f64) {
        let Some(mut ease) = self.ease else {
            return;
        };
        ease.elapsed_s += dt_s.max(0.0);
        let [x, y, zoom] = ease.sample();
        self.center = GeoPosition::new(lat_from_mercator_y(y), lon_from_mercator_x(x));
        self.zoom = zoom;
        self.ease = if ease.progress() >= 1.0 {
            None
        } else {
            Some(ease)
        };
    }

    /// Runs the current transition to completion.
    pub fn finish(&mut self) {
        if let Some(ease) = self.ease.as_mut() {
            ease.elapsed_s = ease.duration_s;
        }
        self.update(0.0);
    }

    /// Screen position (px, y down) of `p` for the current camera.
    pub fn project(&self, p: GeoPosition) -> [f64; 2] {
        let ws = world_size_px(self.zoom);
        let dx = (mercator_x(p.longitude) - mercator_x(self.center.longitude)) * ws;
        let dy = (mercator_y(p.latitude) - mercator_y(self.center.latitude)) * ws;
        [self.viewport_px[0] * 0.5 + dx, self.viewport_px[1] * 0.5 + dy]
    }

    /// Lon/lat rectangle currently on screen.
    pub fn visible_bounds(&self) -> GeoBounds {
        let ws = world_size_px(self.zoom);
        let cx = mercator_x(self.center.longitude);
        let cy = mercator_y(self.center.latitude);
        let half_w = self.viewport_px[0] * 0.5 / ws;
        let half_h = self.viewport_px[1] * 0.5 / ws;
        GeoBounds::new(
            lon_from_mercator_x(cx - half_w),
            lat_from_mercator_y(cy + half_h),
            lon_from_mercator_x(cx + half_w),
            lat_from_mercator_y(cy - half_h),
        )
    }

    fn resolve(&self, options: CameraOptions) -> (GeoPosition, f64) {
        let center = options.center.map(normalize_center).unwrap_or(self.center);
        let zoom = options
            .zoom
            .filter(|z| z.is_finite())
            .unwrap_or(self.zoom)
            .clamp(self.min_zoom, self.max_zoom);
        (center, zoom)
    }
}

impl MapCamera for MercatorCamera {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn ease_to(&mut self, options: CameraOptions) {
        let (center, zoom) = self.resolve(options);
        if self.ease_duration_s <= 0.0 {
            self.jump_to(options);
            return;
        }
        // Starting from the current (possibly mid-flight) pose replaces the
        // previous transition in place.
        self.ease = Some(Ease {
            from: [
                mercator_x(self.center.longitude),
                mercator_y(self.center.latitude),
                self.zoom,
            ],
            to: [mercator_x(center.longitude), mercator_y(center.latitude), zoom],
            elapsed_s: 0.0,
            duration_s: self.ease_duration_s,
        });
    }

    fn camera_for_bounds(&self, bounds: &GeoBounds, padding: Insets) -> Option<CameraOptions> {
        let avail_w = self.viewport_px[0] - padding.horizontal();
        let avail_h = self.viewport_px[1] - padding.vertical();
        if !(avail_w >= 0.0 && avail_h >= 0.0) {
            return None;
        }

        let (sw, ne) = bounds.corners();
        let x0 = mercator_x(sw.longitude);
        let x1 = mercator_x(ne.longitude);
        let y0 = mercator_y(ne.latitude);
        let y1 = mercator_y(sw.latitude);
        let span_x = (x1 - x0).abs();
        let span_y = (y1 - y0).abs();

        // Zoom at which each span exactly fills the padded viewport. A zero span
        // yields +inf, which the max-zoom clamp absorbs.
        let zoom_x = (avail_w / (span_x * world_size_px(0.0))).log2();
        let zoom_y = (avail_h / (span_y * world_size_px(0.0))).log2();
        let zoom = zoom_x.min(zoom_y).min(self.max_zoom).max(self.min_zoom);
        if !zoom.is_finite() {
            return None;
        }

        let ws = world_size_px(zoom);
        let offset_x = (padding.left - padding.right) * 0.5 / ws;
        let offset_y = (padding.top - padding.bottom) * 0.5 / ws;
        let cx = (x0 + x1) * 0.5 - offset_x;
        let cy = (y0 + y1) * 0.5 - offset_y;
        let center = GeoPosition::new(lat_from_mercator_y(cy), lon_from_mercator_x(cx));
        if !center.latitude.is_finite() || !center.longitude.is_finite() {
            return None;
        }

        Some(CameraOptions::center(center).with_zoom(zoom).north_up())
    }
}

fn normalize_center(p: GeoPosition) -> GeoPosition {
    GeoPosition::new(clamp_lat_deg(p.latitude), wrap_lon_deg(p.longitude))
}

fn sanitize_zoom_limits(min_zoom: f64, max_zoom: f64) -> (f64, f64) {
    let min_zoom = if min_zoom.is_finite() { min_zoom } else { DEFAULT_MIN_ZOOM };
    let max_zoom = if max_zoom.is_finite() { max_zoom } else { DEFAULT_MAX_ZOOM };
    (min_zoom, max_zoom.max(min_zoom))
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::MercatorCamera;
    use crate::handle::MapCamera;
    use crate::options::CameraOptions;
    use foundation::{GeoBounds, GeoPosition, Insets};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn jakarta() -> MercatorCamera {
        MercatorCamera::new(GeoPosition::new(-6.05, 106.8), 11.0, [800.0, 600.0])
    }

    #[test]
    fn ease_keeps_unspecified_fields() {
        let mut cam = jakarta().with_ease_duration(0.0);
        cam.ease_to(CameraOptions::center(GeoPosition::new(-6.0, 106.9)));
        assert_eq!(cam.zoom(), 11.0);
        assert_close(cam.center().latitude, -6.0, 1e-12);
        assert_close(cam.center().longitude, 106.9, 1e-12);
    }

    #[test]
    fn ease_animates_to_target() {
        let mut cam = jakarta().with_ease_duration(1.0);
        cam.ease_to(CameraOptions::center(GeoPosition::new(-6.0, 106.9)).with_zoom(12.0));
        assert!(cam.is_animating());
        assert_eq!(cam.zoom(), 11.0);

        cam.update(0.5);
        assert!(cam.zoom() > 11.0 && cam.zoom() < 12.0);

        cam.update(0.5);
        assert!(!cam.is_animating());
        assert_close(cam.zoom(), 12.0, 1e-12);
        assert_close(cam.center().latitude, -6.0, 1e-9);
        assert_close(cam.center().longitude, 106.9, 1e-9);
    }

    #[test]
    fn later_ease_supersedes_earlier() {
        let mut cam = jakarta().with_ease_duration(1.0);
        cam.ease_to(CameraOptions::center(GeoPosition::new(10.0, 10.0)));
        cam.update(0.25);
        cam.ease_to(CameraOptions::center(GeoPosition::new(-6.1, 106.7)));
        cam.finish();
        assert_close(cam.center().latitude, -6.1, 1e-9);
        assert_close(cam.center().longitude, 106.7, 1e-9);
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let mut cam = jakarta().with_zoom_limits(2.0, 14.0).with_ease_duration(0.0);
        cam.ease_to(CameraOptions::default().with_zoom(30.0));
        assert_eq!(cam.zoom(), 14.0);
        cam.ease_to(CameraOptions::default().with_zoom(-3.0));
        assert_eq!(cam.zoom(), 2.0);
    }

    #[test]
    fn bounds_camera_frames_both_points_inside_padding() {
        let mut cam = jakarta();
        let a = GeoPosition::new(-6.07, 106.79);
        let b = GeoPosition::new(-6.02, 106.84);
        let bounds = GeoBounds::from_positions(&[a, b]).unwrap();
        let pad = Insets::uniform(10.0);

        let opts = cam.camera_for_bounds(&bounds, pad).expect("camera");
        assert_eq!(opts.bearing, Some(0.0));
        assert_eq!(opts.pitch, Some(0.0));
        cam.jump_to(opts);

        let [w, h] = cam.viewport_size();
        for p in [a, b] {
            let [x, y] = cam.project(p);
            assert!(x >= 10.0 - 1e-6 && x <= w - 10.0 + 1e-6, "x={x}");
            assert!(y >= 10.0 - 1e-6 && y <= h - 10.0 + 1e-6, "y={y}");
        }
        assert!(cam.visible_bounds().contains(a));
        assert!(cam.visible_bounds().contains(b));
    }

    #[test]
    fn bounds_camera_tight_axis_touches_padding() {
        let mut cam = MercatorCamera::new(GeoPosition::new(0.0, 0.0), 1.0, [400.0, 400.0]);
        // Wide, flat box: the horizontal axis constrains the zoom.
        let bounds = GeoBounds::new(-10.0, -1.0, 10.0, 1.0);
        let opts = cam.camera_for_bounds(&bounds, Insets::uniform(20.0)).unwrap();
        cam.jump_to(opts);
        let [x0, _] = cam.project(GeoPosition::new(0.0, -10.0));
        let [x1, _] = cam.project(GeoPosition::new(0.0, 10.0));
        assert_close(x0, 20.0, 1e-6);
        assert_close(x1, 380.0, 1e-6);
    }

    #[test]
    fn asymmetric_padding_shifts_center() {
        let cam = MercatorCamera::new(GeoPosition::new(0.0, 0.0), 1.0, [400.0, 400.0]);
        let bounds = GeoBounds::new(-10.0, -10.0, 10.0, 10.0);
        let pad = Insets {
            top: 0.0,
            bottom: 0.0,
            left: 100.0,
            right: 0.0,
        };
        let opts = cam.camera_for_bounds(&bounds, pad).unwrap();
        // Content is pushed right, so the camera looks further west.
        assert!(opts.center.unwrap().longitude < 0.0);
    }

    #[test]
    fn degenerate_bounds_clamp_to_max_zoom() {
        let cam = jakarta().with_zoom_limits(0.0, 18.0);
        let p = GeoPosition::new(-6.07, 106.79);
        let bounds = GeoBounds::from_positions(&[p]).unwrap();
        let opts = cam.camera_for_bounds(&bounds, Insets::uniform(10.0)).unwrap();
        assert_eq!(opts.zoom, Some(18.0));
        let c = opts.center.unwrap();
        assert_close(c.latitude, p.latitude, 1e-9);
        assert_close(c.longitude, p.longitude, 1e-9);
    }

    #[test]
    fn oversized_padding_has_no_camera() {
        let cam = jakarta();
        let bounds = GeoBounds::new(106.7, -6.1, 106.9, -6.0);
        assert!(cam.camera_for_bounds(&bounds, Insets::uniform(500.0)).is_none());
    }

    #[test]
    fn configured_limits_bound_the_starting_zoom() {
        let origin = GeoPosition::new(0.0, 0.0);
        let cam = MercatorCamera::with_limits(origin, 23.0, [400.0, 400.0], 0.0, 24.0);
        assert_eq!(cam.zoom(), 23.0);
        let cam = MercatorCamera::with_limits(origin, 23.0, [400.0, 400.0], 0.0, 20.0);
        assert_eq!(cam.zoom(), 20.0);
    }

    #[test]
    fn non_finite_limits_fall_back_to_defaults() {
        let cam = jakarta().with_zoom_limits(f64::NAN, f64::INFINITY);
        assert_eq!(cam.zoom(), 11.0);
        let opts = cam
            .camera_for_bounds(
                &GeoBounds::from_positions(&[GeoPosition::new(1.0, 1.0)]).unwrap(),
                Insets::uniform(0.0),
            )
            .unwrap();
        assert_eq!(opts.zoom, Some(22.0));
    }

    #[test]
    fn target_state_reports_pending_destination() {
        let mut cam = jakarta().with_ease_duration(1.0);
        cam.ease_to(CameraOptions::default().with_zoom(13.0));
        assert_close(cam.target_state().zoom, 13.0, 1e-12);
        assert_eq!(cam.state().zoom, 11.0);
    }
}
