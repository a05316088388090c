use foundation::{GeoPosition, NodeNum, WaypointId};
use scene::{Node, Waypoint};
use serde::Serialize;

use crate::overlay::FishingSpot;

/// Which edge of the marker element sits on its coordinate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMarker {
    pub key: String,
    pub num: NodeNum,
    pub position: GeoPosition,
    pub label: String,
    pub anchor: Anchor,
    pub selected: bool,
}

impl NodeMarker {
    pub fn new(node: &Node, selected: bool) -> Self {
        Self {
            key: format!("marker-{}", node.num),
            num: node.num,
            position: node.geo_position(),
            label: node.display_label(),
            anchor: Anchor::Bottom,
            selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaypointMarker {
    pub key: String,
    pub id: WaypointId,
    pub position: GeoPosition,
    pub name: String,
    pub anchor: Anchor,
}

impl WaypointMarker {
    pub fn new(waypoint: &Waypoint) -> Self {
        Self {
            key: waypoint.id.to_string(),
            id: waypoint.id,
            position: waypoint.geo_position(),
            name: waypoint.name.clone(),
            anchor: Anchor::Bottom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayMarker {
    pub key: String,
    pub position: GeoPosition,
    pub label: String,
    pub anchor: Anchor,
}

impl OverlayMarker {
    pub fn new(index: usize, spot: &FishingSpot) -> Self {
        Self {
            key: format!("overlay-marker-{index}"),
            position: spot.position(),
            label: spot.label(),
            anchor: Anchor::Bottom,
        }
    }
}

/// Detail box for the selected node, hung below its marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub num: NodeNum,
    pub position: GeoPosition,
    pub anchor: Anchor,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_heard: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snr: Option<f32>,
}

impl Popup {
    pub fn new(node: &Node) -> Self {
        let long_name = node
            .user
            .as_ref()
            .map(|u| u.long_name.clone())
            .filter(|s| !s.is_empty());
        Self {
            num: node.num,
            position: node.geo_position(),
            anchor: Anchor::Top,
            title: node.display_label(),
            long_name,
            last_heard: node.last_heard,
            snr: node.snr,
        }
    }
}

/// Everything the map draws on top of the base style for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerScene {
    pub nodes: Vec<NodeMarker>,
    pub waypoints: Vec<WaypointMarker>,
    pub overlay: Vec<OverlayMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<Popup>,
    pub map_brightness: f64,
}
