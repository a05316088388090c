use foundation::NodeNum;
use scene::{DeviceSnapshot, Node};
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Pointer click delivered to the map and its markers.
///
/// A marker handler stops propagation so the same click does not also reach
/// the map's own click handler.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Inputs the map page reacts to, in the order they happen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapEvent {
    /// Full replacement of the device's node and waypoint lists.
    Snapshot { snapshot: DeviceSnapshot },
    NodeUpdated { node: Node },
    NodeRemoved { num: NodeNum },
    /// The map finished loading its style.
    MapReady,
    /// Click on a node marker. Bubbles to the map unless stopped.
    MarkerClicked { num: NodeNum },
    /// Click on bare map.
    MapClicked,
    PopupClosed,
    ToggleOverlay,
    FitAll,
    SetTheme { theme: Theme },
}
