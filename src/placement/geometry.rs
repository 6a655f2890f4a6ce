//! From placement parameter to label box.

use glam::DVec2;

use super::avoidance::avoid_node;
use crate::config::ModelConfiguration;
use crate::defaults;
use crate::edge::Edge;
use crate::parameter::{PlacementParameter, Side};
use crate::path::unit;
use crate::types::{OrientedBox, Size, up_from_rotation};

/// Resolve `parameter` to the box a label of `label_size` occupies on `edge`.
///
/// Never fails: stale segment indices clamp to the path, degenerate paths get
/// a fixed box at the source end, and invalid sizes collapse to zero.
pub fn resolve(
    parameter: &PlacementParameter,
    label_size: Size,
    edge: &Edge,
    config: &ModelConfiguration,
) -> OrientedBox {
    let size = sanitize_size(label_size);
    if edge.path.is_degenerate() {
        return fallback_box(edge, size, config);
    }

    let (index, ratio) = parameter.canonical(edge.path.segment_count());
    let ratio = if ratio.is_finite() {
        ratio
    } else {
        crate::log::warn!(ratio, "non-finite placement ratio, using the segment middle");
        defaults::DEFAULT_RATIO
    };

    match segment_anchors(edge, index, size, config, parameter.side) {
        Some(anchors) => anchors.at(ratio),
        None => fallback_box(edge, size, config),
    }
}

/// Label boxes at both ends of one segment, after node avoidance.
///
/// Every position on the segment is derived from these two boxes, which keeps
/// the resolver, the finder and the enumerator in agreement.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SegmentAnchors {
    pub start: OrientedBox,
    pub end: OrientedBox,
    /// Direction of travel along the segment.
    pub direction: DVec2,
}

impl SegmentAnchors {
    /// Direction absolute ratios extend along.
    pub fn extension(&self) -> DVec2 {
        unit(self.end.center() - self.start.center()).unwrap_or(self.direction)
    }

    /// Box at `ratio`: interpolated inside `[0, 1]`, extended by absolute
    /// distance outside.
    pub fn at(&self, ratio: f64) -> OrientedBox {
        let anchor = if ratio < 0.0 {
            self.start.anchor + self.extension() * ratio
        } else if ratio > 1.0 {
            self.end.anchor + self.extension() * (ratio - 1.0)
        } else if ratio == 1.0 {
            self.end.anchor
        } else {
            self.start.anchor.lerp(self.end.anchor, ratio)
        };
        OrientedBox {
            anchor,
            ..self.start
        }
    }
}

/// End boxes of segment `index` on `side`, or `None` past the path end.
pub(crate) fn segment_anchors(
    edge: &Edge,
    index: usize,
    size: Size,
    config: &ModelConfiguration,
    side: Side,
) -> Option<SegmentAnchors> {
    let segment = edge.path.segment(index)?;
    let direction = edge.segment_direction(index);
    let up = label_up(direction, config);
    let offset = offset_normal(direction, up, config) * (config.distance() * side.sign());

    let mut start = OrientedBox::from_center(segment.first + offset, size, up);
    let mut end = OrientedBox::from_center(segment.second + offset, size, up);

    if index == 0 {
        if let Some(node) = edge.source_box {
            start = avoid_node(start, &node, direction, segment.first);
        }
    }
    if index + 1 == edge.path.segment_count() {
        if let Some(node) = edge.target_box {
            end = avoid_node(end, &node, -direction, segment.second);
        }
    }

    Some(SegmentAnchors {
        start,
        end,
        direction,
    })
}

/// Up vector of a label on a segment running along `direction`.
///
/// With auto rotation the label's width follows the segment, so an upright
/// label corresponds to travel along +x; the configured angle is added on top.
fn label_up(direction: DVec2, config: &ModelConfiguration) -> DVec2 {
    let turn = DVec2::from_angle(config.angle());
    let base = if config.auto_rotation_enabled() {
        left_of(direction)
    } else {
        DVec2::NEG_Y
    };
    turn.rotate(base)
}

/// Unit vector the configured distance is measured along.
fn offset_normal(direction: DVec2, up: DVec2, config: &ModelConfiguration) -> DVec2 {
    if config.distance_relative_to_edge() {
        left_of(direction)
    } else {
        up
    }
}

/// Left of the direction of travel, with y growing downwards.
fn left_of(direction: DVec2) -> DVec2 {
    DVec2::new(direction.y, -direction.x)
}

/// Fixed box for paths with nothing to slide along.
pub(crate) fn fallback_box(edge: &Edge, size: Size, config: &ModelConfiguration) -> OrientedBox {
    let center = edge.source_anchor().unwrap_or(DVec2::ZERO);
    crate::log::debug!(
        points = edge.path.len(),
        x = center.x,
        y = center.y,
        "degenerate edge path, placing label at source"
    );
    OrientedBox::from_center(center, size, up_from_rotation(config.angle()))
}

pub(crate) fn sanitize_size(size: Size) -> Size {
    let clean = size.sanitized();
    if clean != size {
        crate::log::warn!(
            width = size.width,
            height = size.height,
            "invalid label size, clamping to zero"
        );
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeBox;
    use glam::dvec2;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;
    const LABEL: Size = Size::new(40.0, 10.0);

    fn assert_vec_eq(actual: DVec2, expected: DVec2) {
        assert!(
            actual.abs_diff_eq(expected, EPSILON),
            "{actual:?} != {expected:?}"
        );
    }

    fn straight() -> Edge {
        Edge::new(vec![dvec2(0.0, 0.0), dvec2(100.0, 0.0)])
    }

    #[test]
    fn midpoint_of_straight_edge() {
        let placed = resolve(
            &PlacementParameter::default(),
            LABEL,
            &straight(),
            &ModelConfiguration::default(),
        );
        assert_vec_eq(placed.center(), dvec2(50.0, 0.0));
        assert_vec_eq(placed.up, DVec2::NEG_Y);
        assert_eq!(placed.size(), LABEL);
    }

    #[test]
    fn positive_distance_is_left_of_travel() {
        let config = ModelConfiguration::new(10.0, 0.0).unwrap();
        let placed = resolve(&PlacementParameter::default(), LABEL, &straight(), &config);
        // Travelling along +x on screen, left is up.
        assert_vec_eq(placed.center(), dvec2(50.0, -10.0));

        let right = PlacementParameter::default().with_side(Side::Right);
        let mirrored = resolve(&right, LABEL, &straight(), &config);
        assert_vec_eq(mirrored.center(), dvec2(50.0, 10.0));
    }

    #[test]
    fn auto_rotation_follows_segment() {
        let edge = Edge::new(vec![dvec2(0.0, 0.0), dvec2(0.0, 100.0)]);
        let placed = resolve(
            &PlacementParameter::default(),
            LABEL,
            &edge,
            &ModelConfiguration::default(),
        );
        assert!((placed.rotation() - FRAC_PI_2).abs() < EPSILON);
        assert_vec_eq(placed.center(), dvec2(0.0, 50.0));
    }

    #[test]
    fn fixed_rotation_ignores_segment() {
        let edge = Edge::new(vec![dvec2(0.0, 0.0), dvec2(0.0, 100.0)]);
        let config = ModelConfiguration::slider();
        let placed = resolve(&PlacementParameter::default(), LABEL, &edge, &config);
        assert_vec_eq(placed.up, DVec2::NEG_Y);
    }

    #[test]
    fn angle_adds_to_segment_rotation() {
        let config = ModelConfiguration::new(0.0, FRAC_PI_2).unwrap();
        let placed = resolve(&PlacementParameter::default(), LABEL, &straight(), &config);
        assert_vec_eq(placed.up, dvec2(1.0, 0.0));
        assert_vec_eq(placed.center(), dvec2(50.0, 0.0));
    }

    #[test]
    fn distance_along_label_up_when_not_edge_relative() {
        // Segment runs downwards, label stays upright: "above" is -y, not the
        // left of travel (+x).
        let edge = Edge::new(vec![dvec2(0.0, 0.0), dvec2(0.0, 100.0)]);
        let config = ModelConfiguration::slider()
            .with_distance(10.0)
            .unwrap()
            .with_distance_relative_to_edge(false);
        let placed = resolve(&PlacementParameter::default(), LABEL, &edge, &config);
        assert_vec_eq(placed.center(), dvec2(0.0, 40.0));

        let relative = config.with_distance_relative_to_edge(true);
        let placed = resolve(&PlacementParameter::default(), LABEL, &edge, &relative);
        assert_vec_eq(placed.center(), dvec2(10.0, 50.0));
    }

    #[test]
    fn absolute_ratios_extend_past_segment_ends() {
        let config = ModelConfiguration::default();
        let past = resolve(&PlacementParameter::from_source(0, 1.3), LABEL, &straight(), &config);
        assert_vec_eq(past.center(), dvec2(100.3, 0.0));
        let before_start = PlacementParameter::from_source(0, -7.0);
        let before = resolve(&before_start, LABEL, &straight(), &config);
        assert_vec_eq(before.center(), dvec2(-7.0, 0.0));
    }

    #[test]
    fn from_target_parameter_measures_backwards() {
        let config = ModelConfiguration::default();
        let quarter = PlacementParameter::from_target(0, 0.25);
        let placed = resolve(&quarter, LABEL, &straight(), &config);
        assert_vec_eq(placed.center(), dvec2(75.0, 0.0));
        let past = resolve(&PlacementParameter::from_target(0, -4.0), LABEL, &straight(), &config);
        assert_vec_eq(past.center(), dvec2(104.0, 0.0));
    }

    #[test]
    fn source_node_pushes_start_box_out() {
        let edge = straight().with_source_box(NodeBox::from_rect(-20.0, -20.0, 40.0, 40.0));
        let config = ModelConfiguration::default();
        let start = resolve(&PlacementParameter::from_source(0, 0.0), LABEL, &edge, &config);
        assert_vec_eq(start.center(), dvec2(45.0, 0.0));
        // Interior positions interpolate towards the untouched end.
        let middle = resolve(&PlacementParameter::from_source(0, 0.5), LABEL, &edge, &config);
        assert_vec_eq(middle.center(), dvec2(72.5, 0.0));
    }

    #[test]
    fn target_node_pushes_end_box_out() {
        let edge = straight().with_target_box(NodeBox::from_rect(80.0, -20.0, 40.0, 40.0));
        let config = ModelConfiguration::default();
        let end = resolve(&PlacementParameter::from_target(0, 0.0), LABEL, &edge, &config);
        assert_vec_eq(end.center(), dvec2(55.0, 0.0));
    }

    #[test]
    fn degenerate_path_uses_source_anchor() {
        let config = ModelConfiguration::new(25.0, FRAC_PI_2).unwrap();
        let edge = Edge::new(vec![dvec2(7.0, 3.0)]);
        let placed = resolve(&PlacementParameter::from_source(4, 0.9), LABEL, &edge, &config);
        assert_vec_eq(placed.center(), dvec2(7.0, 3.0));
        assert_vec_eq(placed.up, dvec2(1.0, 0.0));

        let empty = resolve(&PlacementParameter::default(), LABEL, &Edge::default(), &config);
        assert_vec_eq(empty.center(), DVec2::ZERO);
    }

    #[test]
    fn invalid_size_collapses_to_zero() {
        let placed = resolve(
            &PlacementParameter::default(),
            Size::new(-5.0, f64::NAN),
            &straight(),
            &ModelConfiguration::default(),
        );
        assert_eq!(placed.size(), Size::ZERO);
        assert_vec_eq(placed.center(), dvec2(50.0, 0.0));
    }

    #[test]
    fn non_finite_ratio_uses_middle() {
        let parameter = PlacementParameter {
            ratio: f64::NAN,
            ..PlacementParameter::default()
        };
        let placed = resolve(&parameter, LABEL, &straight(), &ModelConfiguration::default());
        assert_vec_eq(placed.center(), dvec2(50.0, 0.0));
    }

    #[test]
    fn coincident_end_boxes_extend_along_segment() {
        let anchors = SegmentAnchors {
            start: OrientedBox::from_center(DVec2::ZERO, LABEL, DVec2::NEG_Y),
            end: OrientedBox::from_center(DVec2::ZERO, LABEL, DVec2::NEG_Y),
            direction: DVec2::Y,
        };
        assert_vec_eq(anchors.extension(), DVec2::Y);
        assert_vec_eq(anchors.at(3.0).center(), dvec2(0.0, 2.0));
    }
}
