//! Offline drivers for the map page: load a device snapshot or a recorded
//! session from JSON, run it against an in-process camera and report what the
//! page would show.

use std::fs;
use std::path::Path;

use camera::{CameraOptions, CameraState, CameraTarget, MercatorCamera, RecordingCamera};
use foundation::NodeNum;
use layers::{MapConfig, MapEvent, MarkerLayer, MarkerScene};
use runtime::{EventBus, MetricsSnapshot};
use scene::DeviceSnapshot;
use serde::{Deserialize, Serialize};
use tracing::info;

pub type Layer = MarkerLayer<RecordingCamera<MercatorCamera>>;

/// A snapshot followed by the events a user produced on top of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub snapshot: DeviceSnapshot,
    #[serde(default)]
    pub events: Vec<MapEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitReport {
    pub valid_nodes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<CameraTarget>,
    pub camera: CameraState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub events: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<NodeNum>,
    pub overlay_visible: bool,
    pub camera: CameraState,
    pub commands: Vec<CameraOptions>,
    pub metrics: MetricsSnapshot,
}

pub fn load_config(path: Option<&Path>) -> Result<MapConfig, String> {
    match path {
        Some(p) => MapConfig::load(p).map_err(|e| e.to_string()),
        None => Ok(MapConfig::default()),
    }
}

pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
    serde_json::from_str(&text).map_err(|e| format!("parse {path:?}: {e}"))
}

pub fn new_layer(config: MapConfig) -> Layer {
    let camera = RecordingCamera::new(config.build_camera());
    let mut layer = MarkerLayer::new(config);
    layer.attach_camera(camera);
    layer
}

fn settle(layer: &mut Layer) -> CameraState {
    match layer.viewport_mut().camera_mut() {
        Some(cam) => {
            cam.inner_mut().finish();
            cam.inner().state()
        }
        None => layer.config().build_camera().state(),
    }
}

/// Loads `snapshot`, signals map ready and lets the fit animation finish.
pub fn run_fit(snapshot: DeviceSnapshot, config: MapConfig) -> FitReport {
    let mut layer = new_layer(config);
    layer.set_snapshot(snapshot);
    let target = layer.handle_map_ready();
    let camera = settle(&mut layer);
    info!(valid = layer.valid_nodes().len(), ?target, "fit");
    FitReport {
        valid_nodes: layer.valid_nodes().len(),
        target,
        camera,
    }
}

pub fn run_markers(snapshot: DeviceSnapshot, config: MapConfig) -> MarkerScene {
    let mut layer = new_layer(config);
    layer.set_snapshot(snapshot);
    layer.render()
}

/// Replays a session through the event queue in recorded order.
pub fn run_replay(session: Session, config: MapConfig) -> ReplayReport {
    let mut layer = new_layer(config);
    let mut bus = EventBus::new();
    bus.emit(MapEvent::Snapshot {
        snapshot: session.snapshot,
    });
    for event in session.events {
        bus.emit(event);
    }
    let events = layer.process(&mut bus);
    let camera = settle(&mut layer);
    let commands = layer
        .viewport()
        .camera()
        .map(|c| c.commands().to_vec())
        .unwrap_or_default();
    info!(events, commands = commands.len(), "replay finished");
    ReplayReport {
        events,
        selected: layer.selection().selected().map(|n| n.num),
        overlay_visible: layer.overlay_visible(),
        camera,
        commands,
        metrics: layer.metrics().snapshot(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, run_fit, run_markers, run_replay};
    use camera::CameraTarget;
    use foundation::NodeNum;
    use layers::{MapConfig, MapEvent, Theme};
    use pretty_assertions::assert_eq;
    use scene::{DeviceSnapshot, Node};

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "{a} vs {b}");
    }

    fn snapshot() -> DeviceSnapshot {
        DeviceSnapshot::from_parts(
            [
                Node::new(1).with_position(-60_700_000, 1_067_900_000),
                Node::new(2).with_position(-60_200_000, 1_068_400_000),
                Node::new(3),
            ],
            [],
        )
    }

    #[test]
    fn fit_empty_snapshot_keeps_initial_view() {
        let report = run_fit(DeviceSnapshot::new(), MapConfig::default());
        assert_eq!(report.valid_nodes, 0);
        assert_eq!(report.target, None);
        assert_close(report.camera.zoom, 11.0, 1e-12);
        assert_close(report.camera.center.latitude, -6.05, 1e-9);
    }

    #[test]
    fn fit_frames_valid_nodes() {
        let report = run_fit(snapshot(), MapConfig::default());
        assert_eq!(report.valid_nodes, 2);
        assert!(matches!(report.target, Some(CameraTarget::Region { .. })));
        assert_close(report.camera.center.longitude, 106.815, 1e-6);
        assert!(report.camera.zoom > 11.0);
    }

    #[test]
    fn markers_skip_nodes_without_fix() {
        let scene = run_markers(snapshot(), MapConfig::default());
        assert_eq!(scene.nodes.len(), 2);
        assert_eq!(scene.overlay.len(), 5);
        assert_eq!(scene.popup, None);

        let hidden = MapConfig {
            overlay_visible: false,
            ..MapConfig::default()
        };
        assert!(run_markers(snapshot(), hidden).overlay.is_empty());
    }

    #[test]
    fn markers_follow_theme_override() {
        let config = MapConfig {
            theme: Theme::from_str("night"),
            ..MapConfig::default()
        };
        assert_eq!(run_markers(snapshot(), config).map_brightness, 0.9);
    }

    #[test]
    fn replay_reports_final_state() {
        let session = Session {
            snapshot: snapshot(),
            events: vec![
                MapEvent::MapReady,
                MapEvent::MarkerClicked { num: NodeNum(2) },
                MapEvent::ToggleOverlay,
            ],
        };
        let report = run_replay(session, MapConfig::default());
        assert_eq!(report.events, 4);
        assert_eq!(report.selected, Some(NodeNum(2)));
        assert!(!report.overlay_visible);
        assert_eq!(report.commands.len(), 2);
        assert_close(report.camera.center.latitude, -6.02, 1e-9);
        assert_close(report.camera.center.longitude, 106.84, 1e-9);
    }

    #[test]
    fn session_parses_from_json() {
        let session: Session = serde_json::from_str(
            r#"{"snapshot": {"nodes": [{"num": 1, "position": {"latitude_i": -60700000, "longitude_i": 1067900000}}]},
                "events": [{"type": "map_ready"}, {"type": "popup_closed"}]}"#,
        )
        .unwrap();
        assert_eq!(session.snapshot.nodes.len(), 1);
        assert_eq!(session.events.len(), 2);
    }
}
