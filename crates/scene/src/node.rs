use foundation::{GeoPosition, NodeNum, RawPosition, WaypointId, to_geo_position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub long_name: String,
}

/// A mesh node as last reported by the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub num: NodeNum,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<RawPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Seconds since the epoch of the last packet heard from this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_heard: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snr: Option<f32>,
}

impl Node {
    pub fn new(num: u32) -> Self {
        Self {
            num: NodeNum(num),
            position: None,
            user: None,
            last_heard: None,
            snr: None,
        }
    }

    pub fn with_position(mut self, latitude_i: i32, longitude_i: i32) -> Self {
        self.position = Some(RawPosition::new(latitude_i, longitude_i));
        self
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.user.get_or_insert_with(User::default).short_name = short_name.into();
        self
    }

    /// Whether this node has a location fix worth drawing.
    pub fn has_valid_position(&self) -> bool {
        self.position.as_ref().is_some_and(RawPosition::has_fix)
    }

    pub fn geo_position(&self) -> GeoPosition {
        to_geo_position(self.position.as_ref())
    }

    /// Marker text: short name, else the node number.
    pub fn display_label(&self) -> String {
        match &self.user {
            Some(u) if !u.short_name.is_empty() => u.short_name.clone(),
            _ => self.num.to_string(),
        }
    }
}

/// A fixed pin shared on the mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub position: RawPosition,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Waypoint {
    pub fn new(id: u32, latitude_i: i32, longitude_i: i32) -> Self {
        Self {
            id: WaypointId(id),
            position: RawPosition::new(latitude_i, longitude_i),
            name: String::new(),
            description: String::new(),
        }
    }

    pub fn geo_position(&self) -> GeoPosition {
        self.position.to_geo()
    }
}
