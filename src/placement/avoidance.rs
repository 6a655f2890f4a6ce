//! Keep labels at the ends of an edge clear of the end nodes.

use glam::DVec2;

use crate::defaults;
use crate::types::{NodeBox, OrientedBox};

/// Side of a node an edge end leaves through.
///
/// The classification mirrors how the edge approaches: the dominant axis of
/// the direction pointing away from the node picks left/right or top/bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl NodeSide {
    /// Classify a direction pointing away from the node (y grows downwards).
    pub(crate) fn from_direction(away: DVec2) -> Self {
        if away.x.abs() >= away.y.abs() {
            if away.x >= 0.0 {
                NodeSide::Right
            } else {
                NodeSide::Left
            }
        } else if away.y > 0.0 {
            NodeSide::Bottom
        } else {
            NodeSide::Top
        }
    }
}

/// Move `placed` off `node` when it comes closer than the clearance.
///
/// `away` points from the node along the edge and `attachment` is where the
/// edge meets the node. A box that already keeps the clearance is returned
/// unchanged. Otherwise the box slides out through the side the edge leaves
/// by. A box that was only slightly too close keeps its place when the slide
/// would carry it far from the attachment point.
pub(crate) fn avoid_node(
    placed: OrientedBox,
    node: &NodeBox,
    away: DVec2,
    attachment: DVec2,
) -> OrientedBox {
    let clearance = defaults::NODE_LABEL_CLEARANCE;
    if !placed.intersects(&node.inflate(clearance)) {
        return placed;
    }

    let side = NodeSide::from_direction(away);
    let slid = slide_clear_of(&placed, node, side, clearance);

    // The slide leaves the slid bounds a full clearance off the node, so only
    // the original can be the one too close.
    let original_gap = placed.separation(node);
    let original_reach = placed.center().distance(attachment);
    let slid_reach = slid.center().distance(attachment);
    if original_gap >= clearance * 0.5 && slid_reach > original_reach + clearance {
        crate::log::debug!(
            ?side,
            original_gap,
            slid_reach,
            original_reach,
            "label only slightly too close to node, keeping original"
        );
        return placed;
    }

    crate::log::debug!(?side, original_gap, "label moved clear of node");
    slid
}

/// Translate `placed` out through `side` so its bounds sit exactly
/// `clearance` beyond the node, with the center pulled into the node's span
/// along that side.
fn slide_clear_of(
    placed: &OrientedBox,
    node: &NodeBox,
    side: NodeSide,
    clearance: f64,
) -> OrientedBox {
    let bounds = placed.bounds();
    let center = placed.center();
    let shift = match side {
        NodeSide::Right => DVec2::new(
            node.max.x + clearance - bounds.min.x,
            into_span(center.y, node.min.y, node.max.y),
        ),
        NodeSide::Left => DVec2::new(
            node.min.x - clearance - bounds.max.x,
            into_span(center.y, node.min.y, node.max.y),
        ),
        NodeSide::Bottom => DVec2::new(
            into_span(center.x, node.min.x, node.max.x),
            node.max.y + clearance - bounds.min.y,
        ),
        NodeSide::Top => DVec2::new(
            into_span(center.x, node.min.x, node.max.x),
            node.min.y - clearance - bounds.max.y,
        ),
    };
    placed.translated(shift)
}

/// Shift that brings `value` into `[lo, hi]`.
fn into_span(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi) - value
}
