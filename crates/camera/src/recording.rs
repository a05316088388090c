use foundation::{GeoBounds, Insets};

use crate::handle::MapCamera;
use crate::options::CameraOptions;

/// Wraps a camera and keeps every `ease_to` it receives, in order.
///
/// Used by the replay tool to print the command stream, and by tests to count
/// camera commands.
#[derive(Debug, Clone)]
pub struct RecordingCamera<C> {
    inner: C,
    commands: Vec<CameraOptions>,
}

impl<C> RecordingCamera<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[CameraOptions] {
        &self.commands
    }

    pub fn last_command(&self) -> Option<&CameraOptions> {
        self.commands.last()
    }

    pub fn take_commands(&mut self) -> Vec<CameraOptions> {
        std::mem::take(&mut self.commands)
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut C {
        &mut self.inner
    }
}

impl<C: MapCamera> MapCamera for RecordingCamera<C> {
    fn zoom(&self) -> f64 {
        self.inner.zoom()
    }

    fn ease_to(&mut self, options: CameraOptions) {
        self.commands.push(options);
        self.inner.ease_to(options);
    }

    fn camera_for_bounds(&self, bounds: &GeoBounds, padding: Insets) -> Option<CameraOptions> {
        self.inner.camera_for_bounds(bounds, padding)
    }
}

#[cfg(test)]
mod tests {
    use super::RecordingCamera;
    use crate::handle::MapCamera;
    use crate::mercator_camera::MercatorCamera;
    use crate::options::CameraOptions;
    use foundation::GeoPosition;

    #[test]
    fn records_and_delegates() {
        let inner = MercatorCamera::new(GeoPosition::new(0.0, 0.0), 3.0, [100.0, 100.0])
            .with_ease_duration(0.0);
        let mut cam = RecordingCamera::new(inner);
        cam.ease_to(CameraOptions::default().with_zoom(5.0));
        cam.ease_to(CameraOptions::default().with_zoom(6.0));

        assert_eq!(cam.commands().len(), 2);
        assert_eq!(cam.last_command().unwrap().zoom, Some(6.0));
        assert_eq!(cam.zoom(), 6.0);

        let taken = cam.take_commands();
        assert_eq!(taken.len(), 2);
        assert!(cam.commands().is_empty());
    }
}
