//! From an arbitrary label box back to the closest placement parameter.

use glam::DVec2;

use super::geometry::{SegmentAnchors, sanitize_size, segment_anchors};
use crate::config::ModelConfiguration;
use crate::defaults;
use crate::edge::Edge;
use crate::parameter::{PlacementParameter, Side};
use crate::types::OrientedBox;

/// Closest parameter the model can express for a label at `target`.
///
/// Every offered side and segment is scored by the squared distance from the
/// target center to that segment's anchor line; the first best score wins.
/// Positions beyond a segment end come back as absolute ratios.
pub fn find_best_parameter(
    target: &OrientedBox,
    edge: &Edge,
    config: &ModelConfiguration,
) -> PlacementParameter {
    if edge.path.is_degenerate() {
        crate::log::debug!("degenerate edge path, returning default parameter");
        return PlacementParameter::default();
    }

    let size = sanitize_size(target.size());
    let center = target.center();
    let segment_count = edge.path.segment_count();

    let mut best: Option<Candidate> = None;
    for &side in config.sides().sides() {
        for index in 0..segment_count {
            let Some(anchors) = segment_anchors(edge, index, size, config, side) else {
                continue;
            };
            let fit = fit_segment(&anchors, center);
            if best.as_ref().is_none_or(|b| fit.quality < b.fit.quality) {
                best = Some(Candidate { index, side, fit });
            }
        }
    }

    match best {
        Some(Candidate { index, side, fit }) => {
            crate::log::debug!(
                index,
                %side,
                ratio = fit.ratio,
                quality = fit.quality,
                "best placement"
            );
            PlacementParameter::encode(index, fit.ratio, segment_count, side)
        }
        None => PlacementParameter::default(),
    }
}

struct Candidate {
    index: usize,
    side: Side,
    fit: Fit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fit {
    /// From-source ratio on the segment.
    ratio: f64,
    /// Squared distance from the point to the anchor segment.
    quality: f64,
}

/// Project `point` onto the line through the segment's end-box centers.
fn fit_segment(anchors: &SegmentAnchors, point: DVec2) -> Fit {
    let c0 = anchors.start.center();
    let c1 = anchors.end.center();
    let span = c1 - c0;

    if span.length() < defaults::SEGMENT_EPSILON {
        return fit_collapsed(c0, anchors.extension(), point);
    }

    let foot = c0 + span * ((point - c0).dot(span) / span.length_squared());
    let perpendicular = point.distance_squared(foot);
    let ratio = if span.x.abs() >= span.y.abs() {
        (foot.x - c0.x) / span.x
    } else {
        (foot.y - c0.y) / span.y
    };

    if ratio < 0.0 {
        let outside = foot.distance(c0);
        Fit {
            ratio: -outside.max(defaults::RATIO_EPSILON),
            quality: perpendicular + outside * outside,
        }
    } else if ratio > 1.0 {
        let outside = foot.distance(c1);
        Fit {
            ratio: 1.0 + outside.max(defaults::RATIO_EPSILON),
            quality: perpendicular + outside * outside,
        }
    } else {
        Fit {
            ratio,
            quality: perpendicular,
        }
    }
}

/// Both end boxes coincide: every ratio in `[0, 1]` is the same spot, so
/// measure along the extension direction alone.
fn fit_collapsed(center: DVec2, direction: DVec2, point: DVec2) -> Fit {
    let offset = point - center;
    let along = offset.dot(direction);
    let perpendicular = (offset - direction * along).length_squared();
    let ratio = if along < 0.0 {
        -(-along).max(defaults::RATIO_EPSILON)
    } else if along > 0.0 {
        1.0 + along.max(defaults::RATIO_EPSILON)
    } else {
        0.0
    };
    Fit {
        ratio,
        quality: perpendicular + along * along,
    }
}
