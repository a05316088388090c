use camera::{CameraTarget, MapCamera, ViewportController};
use foundation::{GeoBounds, GeoPosition, Insets};
use tracing::{debug, warn};

use crate::node::Node;

/// Padding (logical px) kept between the framed nodes and the viewport edge.
pub const FIT_PADDING: f64 = 10.0;

/// Chooses a camera target that shows every position.
///
/// - no positions: `None`
/// - one position, or all positions coincide: center on it at the current zoom
/// - otherwise: the covering region with `padding`
pub fn fit_target(positions: &[GeoPosition], padding: Insets) -> Option<CameraTarget> {
    match positions {
        [] => None,
        [only] => Some(CameraTarget::Center {
            center: *only,
            zoom: None,
        }),
        _ => {
            let bounds = GeoBounds::from_positions(positions)?;
            if bounds.is_degenerate() {
                return Some(CameraTarget::Center {
                    center: bounds.center(),
                    zoom: None,
                });
            }
            Some(CameraTarget::Region { bounds, padding })
        }
    }
}

/// Frames all `nodes` that have a fix and sends the camera there.
///
/// Returns the target the camera was sent to, or `None` when no command was
/// issued (nothing to frame, no camera yet, or a region the camera cannot fit).
pub fn fit_all<C: MapCamera>(
    nodes: &[Node],
    viewport: &mut ViewportController<C>,
    padding: Insets,
) -> Option<CameraTarget> {
    let positions: Vec<GeoPosition> = nodes
        .iter()
        .filter(|n| n.has_valid_position())
        .map(Node::geo_position)
        .collect();

    let Some(target) = fit_target(&positions, padding) else {
        debug!("fit_all: no positioned nodes, camera unchanged");
        return None;
    };

    if !viewport.ease_to_target(&target) {
        if let CameraTarget::Region { bounds, .. } = target
            && viewport.is_attached()
        {
            warn!(?bounds, "fit_all: camera could not frame region");
        }
        return None;
    }
    debug!(nodes = positions.len(), ?target, "fit_all");
    Some(target)
}
