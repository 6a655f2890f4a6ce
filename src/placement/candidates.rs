//! Discrete label positions along an edge.

use super::geometry::{SegmentAnchors, sanitize_size, segment_anchors};
use crate::config::ModelConfiguration;
use crate::defaults;
use crate::edge::Edge;
use crate::parameter::PlacementParameter;
use crate::types::Size;

/// Candidate parameters for a label of `label_size` on `edge`.
///
/// For each offered side and segment, in path order: the segment start, as
/// many evenly spaced positions as fit without the labels piling onto each
/// other, and the segment end. A degenerate path has the default parameter
/// as its only candidate.
pub fn enumerate_candidates(
    label_size: Size,
    edge: &Edge,
    config: &ModelConfiguration,
) -> Vec<PlacementParameter> {
    if edge.path.is_degenerate() {
        crate::log::debug!("degenerate edge path, offering the default parameter only");
        return vec![PlacementParameter::default()];
    }

    let size = sanitize_size(label_size);
    let segment_count = edge.path.segment_count();
    let mut candidates = Vec::new();

    for &side in config.sides().sides() {
        for index in 0..segment_count {
            let Some(anchors) = segment_anchors(edge, index, size, config, side) else {
                continue;
            };
            let between = intermediate_count(&anchors);
            let slots = (between + 1) as f64;

            candidates.push(PlacementParameter::encode(index, 0.0, segment_count, side));
            for k in 1..=between {
                let ratio = k as f64 / slots;
                candidates.push(PlacementParameter::encode(index, ratio, segment_count, side));
            }
            candidates.push(PlacementParameter::encode(index, 1.0, segment_count, side));
        }
    }

    crate::log::debug!(count = candidates.len(), segment_count, "enumerated label candidates");
    candidates
}

/// How many labels fit strictly between the two end positions, measured
/// along whichever label axis has more room.
fn intermediate_count(anchors: &SegmentAnchors) -> usize {
    let travel = anchors.end.anchor - anchors.start.anchor;
    let label = &anchors.start;
    let across_width = fitting(travel.dot(label.right()).abs(), label.width);
    let across_height = fitting(travel.dot(label.up).abs(), label.height);
    across_width.max(across_height)
}

/// Labels of `extent` that fit between two more at either end of `span`,
/// never more than [`defaults::MAX_INTERMEDIATE_CANDIDATES`].
fn fitting(span: f64, extent: f64) -> usize {
    if extent <= 0.0 || !span.is_finite() {
        return 0;
    }
    let slots = (span / extent).floor();
    if slots < 2.0 {
        return 0;
    }
    (slots - 1.0).min(defaults::MAX_INTERMEDIATE_CANDIDATES as f64) as usize
}
