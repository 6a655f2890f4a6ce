//! Edge paths as polylines.
//!
//! The rendering layer describes an edge as a stream of curve commands. Label
//! placement works on straight segments only, so [`sample_path`] keeps the
//! terminal point of every command and drops curve control points: a cubic or
//! quadratic piece becomes its chord.

use glam::DVec2;

use crate::defaults;
use crate::errors::PathDataError;
use crate::path_data::parse_path_data;

/// One command of a rendered edge curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
    QuadTo { ctrl: DVec2, to: DVec2 },
    CubicTo { ctrl1: DVec2, ctrl2: DVec2, to: DVec2 },
    Close,
}

/// Reduce a curve command stream to its polyline vertices.
///
/// `MoveTo` sets both the running point and the start of the current subpath;
/// `Close` returns to that start. A `Close` before any `MoveTo` is ignored.
pub fn sample_path(commands: &[PathCommand]) -> Path {
    let mut points = Vec::with_capacity(commands.len());
    let mut subpath_start: Option<DVec2> = None;

    for command in commands {
        match *command {
            PathCommand::MoveTo(p) => {
                subpath_start = Some(p);
                points.push(p);
            }
            PathCommand::LineTo(to)
            | PathCommand::QuadTo { to, .. }
            | PathCommand::CubicTo { to, .. } => points.push(to),
            PathCommand::Close => match subpath_start {
                Some(start) => points.push(start),
                None => {
                    crate::log::debug!("close command without a subpath start ignored");
                }
            },
        }
    }

    Path { points }
}

/// Ordered polyline from the source anchor to the target anchor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    points: Vec<DVec2>,
}

/// Two consecutive path points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub first: DVec2,
    pub second: DVec2,
}

impl Segment {
    pub fn delta(&self) -> DVec2 {
        self.second - self.first
    }

    pub fn length(&self) -> f64 {
        self.delta().length()
    }

    /// Unit direction, or `None` when the segment is too short to have one.
    pub fn direction(&self) -> Option<DVec2> {
        unit(self.delta())
    }
}

/// Normalize `v` unless it is shorter than [`defaults::SEGMENT_EPSILON`].
pub(crate) fn unit(v: DVec2) -> Option<DVec2> {
    let len = v.length();
    if len < defaults::SEGMENT_EPSILON || !len.is_finite() {
        None
    } else {
        Some(v / len)
    }
}

impl Path {
    pub fn new(points: Vec<DVec2>) -> Self {
        Path { points }
    }

    /// Read SVG path data and sample it.
    pub fn from_path_data(source: &str) -> Result<Self, PathDataError> {
        Ok(sample_path(&parse_path_data(source)?))
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<DVec2> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<DVec2> {
        self.points.last().copied()
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Segment `index`, or `None` past the end.
    pub fn segment(&self, index: usize) -> Option<Segment> {
        let first = *self.points.get(index)?;
        let second = *self.points.get(index + 1)?;
        Some(Segment { first, second })
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment {
            first: w[0],
            second: w[1],
        })
    }

    /// Whether labels on this path fall back to a fixed default box: fewer
    /// than two points, or exactly two points on top of each other.
    pub fn is_degenerate(&self) -> bool {
        match self.points.as_slice() {
            [] | [_] => true,
            [a, b] => a.distance(*b) < defaults::DEGENERATE_PATH_EPSILON,
            _ => false,
        }
    }
}

impl From<Vec<DVec2>> for Path {
    fn from(points: Vec<DVec2>) -> Self {
        Path::new(points)
    }
}
