use std::collections::BTreeMap;

use foundation::NodeNum;
use serde::{Deserialize, Serialize};

use crate::node::{Node, Waypoint};

/// Point-in-time copy of what the device knows: nodes keyed by number and
/// waypoints in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    #[serde(default, with = "node_list")]
    pub nodes: BTreeMap<NodeNum, Node>,
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
}

impl DeviceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        nodes: impl IntoIterator<Item = Node>,
        waypoints: impl IntoIterator<Item = Waypoint>,
    ) -> Self {
        let mut out = Self::new();
        for node in nodes {
            out.upsert_node(node);
        }
        out.waypoints.extend(waypoints);
        out
    }

    pub fn upsert_node(&mut self, node: Node) {
        self.nodes.insert(node.num, node);
    }

    pub fn remove_node(&mut self, num: NodeNum) -> Option<Node> {
        self.nodes.remove(&num)
    }

    pub fn node(&self, num: NodeNum) -> Option<&Node> {
        self.nodes.get(&num)
    }

    /// Nodes with a location fix, in node-number order.
    pub fn valid_nodes(&self) -> Vec<Node> {
        valid_nodes(self.nodes.values())
    }
}

/// Keeps only nodes with a location fix.
///
/// Filtering an already-filtered list returns it unchanged.
pub fn valid_nodes<'a, I>(nodes: I) -> Vec<Node>
where
    I: IntoIterator<Item = &'a Node>,
{
    nodes
        .into_iter()
        .filter(|n| n.has_valid_position())
        .cloned()
        .collect()
}

/// Nodes travel as a JSON array; the key is taken from each node's `num`.
mod node_list {
    use std::collections::BTreeMap;

    use foundation::NodeNum;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::node::Node;

    pub fn serialize<S: Serializer>(
        nodes: &BTreeMap<NodeNum, Node>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let list: Vec<&Node> = nodes.values().collect();
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<NodeNum, Node>, D::Error> {
        let list = Vec::<Node>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|n| (n.num, n)).collect())
    }
}
