use camera::{MapCamera, ViewportController};
use foundation::NodeNum;
use runtime::Metrics;
use tracing::debug;

use crate::node::Node;

pub const METRIC_CLICK: &str = "selection.click";
pub const METRIC_DISMISS: &str = "selection.dismiss";
pub const METRIC_ORPHANED: &str = "selection.orphaned";

/// At most one inspected node.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    Idle,
    Selected(Node),
}

/// Outcome of re-checking the selection against a new node list.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Revalidation {
    /// Nothing was selected.
    Idle,
    /// The selected node is still present; its data was refreshed.
    Refreshed,
    /// The selected node disappeared or lost its fix; selection cleared.
    Cleared,
}

/// Owns the selection state machine.
///
/// Transitions:
/// - `Idle --click(n)--> Selected(n)`, camera eases to `n`
/// - `Selected(a) --click(b)--> Selected(b)`, camera eases to `b` (also when `b == a`)
/// - `Selected(_) --dismiss--> Idle`, camera untouched
#[derive(Debug, Default)]
pub struct SelectionController {
    state: Selection,
    metrics: Metrics,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Selection {
        &self.state
    }

    pub fn selected(&self) -> Option<&Node> {
        match &self.state {
            Selection::Selected(node) => Some(node),
            Selection::Idle => None,
        }
    }

    pub fn is_selected(&self, num: NodeNum) -> bool {
        self.selected().is_some_and(|n| n.num == num)
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Selects `node` and re-centers on it at the current zoom.
    ///
    /// Re-clicking the selected node is not a toggle: it stays selected and
    /// the camera is re-centered again.
    pub fn click<C: MapCamera>(&mut self, node: &Node, viewport: &mut ViewportController<C>) {
        debug!(node = %node.num, previous = ?self.selected().map(|n| n.num), "select");
        self.state = Selection::Selected(node.clone());
        self.metrics.inc_counter(METRIC_CLICK);
        viewport.ease_to_point(node.geo_position(), None);
    }

    /// Closes the detail view. Returns `false` when nothing was selected.
    pub fn dismiss(&mut self) -> bool {
        let Selection::Selected(node) = std::mem::take(&mut self.state) else {
            return false;
        };
        debug!(node = %node.num, "dismiss");
        self.metrics.inc_counter(METRIC_DISMISS);
        true
    }

    /// Re-checks the selection after the node list changed.
    ///
    /// `valid` must be the filtered list of nodes with a fix. A selected node
    /// missing from it is dropped without moving the camera.
    pub fn retain_valid(&mut self, valid: &[Node]) -> Revalidation {
        let Selection::Selected(current) = &self.state else {
            return Revalidation::Idle;
        };
        match valid.iter().find(|n| n.num == current.num) {
            Some(fresh) => {
                self.state = Selection::Selected(fresh.clone());
                Revalidation::Refreshed
            }
            None => {
                debug!(node = %current.num, "selected node no longer valid, clearing");
                self.state = Selection::Idle;
                self.metrics.inc_counter(METRIC_ORPHANED);
                Revalidation::Cleared
            }
        }
    }
}
