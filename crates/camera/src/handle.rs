use foundation::{GeoBounds, Insets};

use crate::options::CameraOptions;

/// The map library's camera, as seen by the core.
///
/// Implementations animate asynchronously; a new `ease_to` supersedes any
/// animation still in flight.
pub trait MapCamera {
    fn zoom(&self) -> f64;

    fn ease_to(&mut self, options: CameraOptions);

    /// Camera that frames `bounds` inside the viewport minus `padding`.
    ///
    /// Returns `None` when no such camera exists (padding larger than the
    /// viewport, non-finite input).
    fn camera_for_bounds(&self, bounds: &GeoBounds, padding: Insets) -> Option<CameraOptions>;
}
