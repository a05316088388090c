use camera::{CameraTarget, MapCamera, ViewportController};
use foundation::NodeNum;
use runtime::{EventBus, Metrics};
use scene::{DeviceSnapshot, Node, SelectionController, fit_all, valid_nodes};
use tracing::{debug, info};

use crate::config::MapConfig;
use crate::events::{ClickEvent, MapEvent};
use crate::markers::{MarkerScene, NodeMarker, OverlayMarker, Popup, WaypointMarker};
use crate::overlay::{FISHING_SPOTS, OverlayToggle};
use crate::theme::Theme;

pub const METRIC_EVENTS: &str = "layer.events";
pub const METRIC_UNKNOWN_MARKER: &str = "layer.unknown_marker";
pub const GAUGE_NODES_TOTAL: &str = "nodes.total";
pub const GAUGE_NODES_VALID: &str = "nodes.valid";

/// Map page orchestration: owns the camera, the selection and the overlay
/// toggle, and derives what gets drawn from the latest device snapshot.
///
/// The valid-node list is recomputed on every snapshot change before
/// anything that depends on it (selection, framing, rendering) runs.
#[derive(Debug)]
pub struct MarkerLayer<C> {
    config: MapConfig,
    viewport: ViewportController<C>,
    selection: SelectionController,
    overlay: OverlayToggle,
    theme: Theme,
    snapshot: DeviceSnapshot,
    valid: Vec<Node>,
    revision: u64,
    initial_fit_done: bool,
    metrics: Metrics,
}

impl<C: MapCamera> MarkerLayer<C> {
    pub fn new(config: MapConfig) -> Self {
        Self {
            overlay: OverlayToggle::new(config.overlay_visible),
            theme: config.theme,
            config,
            viewport: ViewportController::new(),
            selection: SelectionController::new(),
            snapshot: DeviceSnapshot::new(),
            valid: Vec::new(),
            revision: 0,
            initial_fit_done: false,
            metrics: Metrics::new(),
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Hands the layer a live camera. Returns the one it replaced, if any.
    pub fn attach_camera(&mut self, camera: C) -> Option<C> {
        self.viewport.attach(camera)
    }

    pub fn viewport(&self) -> &ViewportController<C> {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportController<C> {
        &mut self.viewport
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn snapshot(&self) -> &DeviceSnapshot {
        &self.snapshot
    }

    /// Nodes with a fix, as of the latest snapshot.
    pub fn valid_nodes(&self) -> &[Node] {
        &self.valid
    }

    /// Bumped once per snapshot change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_snapshot(&mut self, snapshot: DeviceSnapshot) {
        self.snapshot = snapshot;
        self.refresh();
    }

    pub fn upsert_node(&mut self, node: Node) {
        self.snapshot.upsert_node(node);
        self.refresh();
    }

    pub fn remove_node(&mut self, num: NodeNum) -> Option<Node> {
        let removed = self.snapshot.remove_node(num)?;
        self.refresh();
        Some(removed)
    }

    fn refresh(&mut self) {
        self.valid = valid_nodes(self.snapshot.nodes.values());
        self.revision += 1;
        let outcome = self.selection.retain_valid(&self.valid);
        debug!(
            revision = self.revision,
            total = self.snapshot.nodes.len(),
            valid = self.valid.len(),
            ?outcome,
            "node list changed"
        );
    }

    /// Runs the initial fit once the map is ready. Later signals are ignored.
    ///
    /// A ready signal with no camera attached is not consumed, so the fit
    /// still happens on the first ready after a camera arrives.
    pub fn handle_map_ready(&mut self) -> Option<CameraTarget> {
        if self.initial_fit_done {
            debug!("map ready again, initial fit already done");
            return None;
        }
        if !self.viewport.is_attached() {
            debug!("map ready without a camera, deferring initial fit");
            return None;
        }
        self.initial_fit_done = true;
        info!(nodes = self.valid.len(), "map ready, framing nodes");
        self.fit_all()
    }

    pub fn initial_fit_done(&self) -> bool {
        self.initial_fit_done
    }

    /// Frames every valid node now.
    pub fn fit_all(&mut self) -> Option<CameraTarget> {
        fit_all(&self.valid, &mut self.viewport, self.config.fit_insets())
    }

    /// Marker click handler. Unknown or unpositioned nodes are ignored, but
    /// the click is still kept away from the map.
    pub fn handle_marker_click(&mut self, num: NodeNum, click: &mut ClickEvent) {
        click.stop_propagation();
        let Some(node) = self.valid.iter().find(|n| n.num == num) else {
            debug!(node = %num, "click on unknown marker");
            self.metrics.inc_counter(METRIC_UNKNOWN_MARKER);
            return;
        };
        self.selection.click(node, &mut self.viewport);
    }

    /// Click that reached the map surface.
    pub fn handle_map_click(&mut self, click: &ClickEvent) -> bool {
        if click.is_propagation_stopped() || !self.config.close_popup_on_map_click {
            return false;
        }
        self.selection.dismiss()
    }

    pub fn handle_popup_closed(&mut self) -> bool {
        self.selection.dismiss()
    }

    /// Flips the fishing-spot overlay. Returns the new visibility.
    pub fn toggle_overlay(&mut self) -> bool {
        let visible = self.overlay.toggle();
        debug!(visible, "overlay toggled");
        visible
    }

    pub fn overlay_visible(&self) -> bool {
        self.overlay.visible()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn handle(&mut self, event: MapEvent) {
        self.metrics.inc_counter(METRIC_EVENTS);
        match event {
            MapEvent::Snapshot { snapshot } => self.set_snapshot(snapshot),
            MapEvent::NodeUpdated { node } => self.upsert_node(node),
            MapEvent::NodeRemoved { num } => {
                self.remove_node(num);
            }
            MapEvent::MapReady => {
                self.handle_map_ready();
            }
            MapEvent::MarkerClicked { num } => {
                // The same pointer event bubbles to the map afterwards.
                let mut click = ClickEvent::new();
                self.handle_marker_click(num, &mut click);
                self.handle_map_click(&click);
            }
            MapEvent::MapClicked => {
                self.handle_map_click(&ClickEvent::new());
            }
            MapEvent::PopupClosed => {
                self.handle_popup_closed();
            }
            MapEvent::ToggleOverlay => {
                self.toggle_overlay();
            }
            MapEvent::FitAll => {
                self.fit_all();
            }
            MapEvent::SetTheme { theme } => self.set_theme(theme),
        }
    }

    /// Dispatches every queued event in emission order. Returns how many ran.
    pub fn process(&mut self, bus: &mut EventBus<MapEvent>) -> usize {
        let events = bus.drain();
        let count = events.len();
        for event in events {
            debug!(seq = event.seq, "dispatch");
            self.handle(event.payload);
        }
        count
    }

    pub fn render(&self) -> MarkerScene {
        let nodes = self
            .valid
            .iter()
            .map(|n| NodeMarker::new(n, self.selection.is_selected(n.num)))
            .collect();
        let waypoints = self.snapshot.waypoints.iter().map(WaypointMarker::new).collect();
        let overlay = if self.overlay.visible() {
            FISHING_SPOTS
                .iter()
                .enumerate()
                .map(|(i, spot)| OverlayMarker::new(i, spot))
                .collect()
        } else {
            Vec::new()
        };
        MarkerScene {
            nodes,
            waypoints,
            overlay,
            popup: self.selection.selected().map(Popup::new),
            map_brightness: self.theme.map_brightness(),
        }
    }

    /// Layer, camera and selection counters plus node gauges.
    pub fn metrics(&self) -> Metrics {
        let mut out = self.metrics.clone();
        out.merge(self.viewport.metrics());
        out.merge(self.selection.metrics());
        out.set_gauge(GAUGE_NODES_TOTAL, self.snapshot.nodes.len() as i64);
        out.set_gauge(GAUGE_NODES_VALID, self.valid.len() as i64);
        out
    }
}
