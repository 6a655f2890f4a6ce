//! The read-only view of an edge that every placement query receives.

use glam::DVec2;

use crate::path::{Path, unit};
use crate::types::NodeBox;

/// Snapshot of an edge's rendered geometry: its path and, when known, the
/// bounding boxes of the nodes at either end.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Edge {
    pub path: Path,
    pub source_box: Option<NodeBox>,
    pub target_box: Option<NodeBox>,
}

impl Edge {
    pub fn new(path: impl Into<Path>) -> Self {
        Edge {
            path: path.into(),
            source_box: None,
            target_box: None,
        }
    }

    pub fn with_source_box(mut self, node: NodeBox) -> Self {
        self.source_box = Some(node);
        self
    }

    pub fn with_target_box(mut self, node: NodeBox) -> Self {
        self.target_box = Some(node);
        self
    }

    /// Where the edge leaves its source: the first path point, else the
    /// source node's center.
    pub fn source_anchor(&self) -> Option<DVec2> {
        self.path
            .first()
            .or_else(|| self.source_box.map(|b| b.center()))
    }

    /// Unit direction of segment `index`.
    ///
    /// Segments too short to have a direction borrow one from the nearest
    /// usable segment, then from the source-to-target node centers, then from
    /// the first-to-last path point, and finally point along +x.
    pub fn segment_direction(&self, index: usize) -> DVec2 {
        if let Some(dir) = self.path.segment(index).and_then(|s| s.direction()) {
            return dir;
        }

        let count = self.path.segment_count();
        for offset in 1..count {
            let before = index.checked_sub(offset);
            let after = Some(index + offset).filter(|i| *i < count);
            for neighbour in [before, after].into_iter().flatten() {
                if let Some(dir) = self.path.segment(neighbour).and_then(|s| s.direction()) {
                    return dir;
                }
            }
        }

        let from_ports = match (self.source_box, self.target_box) {
            (Some(s), Some(t)) => unit(t.center() - s.center()),
            _ => None,
        };
        let from_ends = match (self.path.first(), self.path.last()) {
            (Some(a), Some(b)) => unit(b - a),
            _ => None,
        };
        from_ports.or(from_ends).unwrap_or(DVec2::X)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn direction_of_regular_segment() {
        let edge = Edge::new(vec![dvec2(0.0, 0.0), dvec2(0.0, 20.0)]);
        assert_eq!(edge.segment_direction(0), dvec2(0.0, 1.0));
    }

    #[test]
    fn zero_length_segment_borrows_neighbour_direction() {
        let edge = Edge::new(vec![
            dvec2(0.0, 0.0),
            dvec2(50.0, 0.0),
            dvec2(50.0, 0.0),
            dvec2(50.0, 40.0),
        ]);
        // Previous segment is searched before the next one.
        assert_eq!(edge.segment_direction(1), dvec2(1.0, 0.0));
    }

    #[test]
    fn all_zero_segments_fall_back_to_node_centers() {
        let edge = Edge::new(vec![dvec2(5.0, 5.0); 3])
            .with_source_box(NodeBox::from_rect(0.0, 0.0, 10.0, 10.0))
            .with_target_box(NodeBox::from_rect(0.0, 30.0, 10.0, 10.0));
        assert_eq!(edge.segment_direction(0), dvec2(0.0, 1.0));
    }

    #[test]
    fn nothing_usable_points_along_x() {
        let edge = Edge::new(vec![dvec2(5.0, 5.0); 3]);
        assert_eq!(edge.segment_direction(1), DVec2::X);
    }

    #[test]
    fn source_anchor_prefers_path() {
        let node = NodeBox::from_rect(10.0, 10.0, 10.0, 10.0);
        assert_eq!(Edge::default().with_source_box(node).source_anchor(), Some(dvec2(15.0, 15.0)));
        let edge = Edge::new(vec![dvec2(1.0, 2.0)]).with_source_box(node);
        assert_eq!(edge.source_anchor(), Some(dvec2(1.0, 2.0)));
        assert_eq!(Edge::default().source_anchor(), None);
    }
}
