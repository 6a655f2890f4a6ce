//! Geometric value types shared by every placement stage.
//!
//! Coordinates follow screen conventions: x grows to the right and y grows
//! downwards. All types are plain `Copy` values; nothing here holds state
//! between placement queries.

use std::f64::consts::TAU;
use std::fmt;

use glam::DVec2;

use crate::errors::ConfigError;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinite values.
#[inline]
pub(crate) fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Reject NaN, infinite and negative values.
#[inline]
pub(crate) fn check_non_negative(val: f64) -> Result<f64, NumericError> {
    let val = check_finite(val)?;
    if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Wrap an angle in radians into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Up vector of a box rotated by `angle` radians.
///
/// Rotation 0 is an upright label: `up = (0, -1)` and the width runs along +x.
pub fn up_from_rotation(angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    DVec2::new(sin, -cos)
}

/// Label dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a size without validation.
    /// Use `try_new` for user-provided values.
    pub const fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    /// Create a size, rejecting NaN, infinite and negative dimensions.
    pub fn try_new(width: f64, height: f64) -> Result<Self, ConfigError> {
        check_non_negative(width)
            .and_then(|_| check_non_negative(height))
            .map_err(|reason| ConfigError::InvalidSize {
                width,
                height,
                reason,
            })?;
        Ok(Size { width, height })
    }

    /// Same size with every non-finite or negative dimension replaced by zero.
    pub fn sanitized(self) -> Self {
        let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Size {
            width: clean(self.width),
            height: clean(self.height),
        }
    }
}

/// Axis-aligned bounding box of an endpoint node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl NodeBox {
    /// Create a box from its top-left corner and dimensions.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        let a = DVec2::new(x, y);
        let b = DVec2::new(x + width, y + height);
        NodeBox {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a box from a center point and a size.
    pub fn from_center(center: DVec2, size: Size) -> Self {
        let half = DVec2::new(size.width, size.height).abs() * 0.5;
        NodeBox {
            min: center - half,
            max: center + half,
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Grow the box by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        NodeBox {
            min: self.min - DVec2::splat(amount),
            max: self.max + DVec2::splat(amount),
        }
    }

    /// Corners in clockwise screen order starting at the top-left.
    pub fn corners(&self) -> [DVec2; 4] {
        [
            self.min,
            DVec2::new(self.max.x, self.min.y),
            self.max,
            DVec2::new(self.min.x, self.max.y),
        ]
    }

    /// Euclidean distance from `p` to the box; zero inside.
    pub fn distance_to_point(&self, p: DVec2) -> f64 {
        p.distance(p.clamp(self.min, self.max))
    }
}

/// A rectangle with arbitrary rotation: the placed label.
///
/// The box covers `anchor + right() * [0, width] + up * [0, height]`. For an
/// upright box (`up = (0, -1)`) the anchor is the bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedBox {
    pub anchor: DVec2,
    /// Unit vector from the bottom edge to the top edge.
    pub up: DVec2,
    pub width: f64,
    pub height: f64,
}

impl OrientedBox {
    /// Create a box from its anchor corner. `up` is normalized; a zero vector
    /// falls back to upright.
    pub fn new(anchor: DVec2, up: DVec2, size: Size) -> Self {
        OrientedBox {
            anchor,
            up: up.try_normalize().unwrap_or(DVec2::NEG_Y),
            width: size.width,
            height: size.height,
        }
    }

    /// Create a box centered on `center`.
    pub fn from_center(center: DVec2, size: Size, up: DVec2) -> Self {
        let mut placed = OrientedBox::new(DVec2::ZERO, up, size);
        placed.anchor = center - placed.half_extent();
        placed
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Unit vector along the width, a quarter turn clockwise from `up` on screen.
    pub fn right(&self) -> DVec2 {
        DVec2::new(-self.up.y, self.up.x)
    }

    /// Rotation in radians, `[0, 2π)`; 0 for an upright box.
    pub fn rotation(&self) -> f64 {
        let right = self.right();
        normalize_angle(right.y.atan2(right.x))
    }

    fn half_extent(&self) -> DVec2 {
        self.right() * (self.width * 0.5) + self.up * (self.height * 0.5)
    }

    pub fn center(&self) -> DVec2 {
        self.anchor + self.half_extent()
    }

    /// Same box moved by `offset`.
    pub fn translated(&self, offset: DVec2) -> Self {
        OrientedBox {
            anchor: self.anchor + offset,
            ..*self
        }
    }

    /// Corners starting at the anchor, walking along the width first.
    pub fn corners(&self) -> [DVec2; 4] {
        let w = self.right() * self.width;
        let h = self.up * self.height;
        [self.anchor, self.anchor + w, self.anchor + w + h, self.anchor + h]
    }

    /// Axis-aligned bounds of the rotated box.
    pub fn bounds(&self) -> NodeBox {
        let corners = self.corners();
        let (min, max) = corners[1..]
            .iter()
            .fold((corners[0], corners[0]), |(min, max), c| (min.min(*c), max.max(*c)));
        NodeBox { min, max }
    }

    /// Euclidean distance from `p` to the box; zero inside.
    pub fn distance_to_point(&self, p: DVec2) -> f64 {
        let local = p - self.anchor;
        let u = local.dot(self.right()).clamp(0.0, self.width);
        let v = local.dot(self.up).clamp(0.0, self.height);
        p.distance(self.anchor + self.right() * u + self.up * v)
    }

    /// Whether the box and `node` share interior area.
    ///
    /// Separating-axis test over the two world axes and the box's own axes.
    /// Touching edges do not count as an intersection.
    pub fn intersects(&self, node: &NodeBox) -> bool {
        const TOUCH: f64 = 1e-9;
        let mine = self.corners();
        let theirs = node.corners();
        [DVec2::X, DVec2::Y, self.right(), self.up]
            .into_iter()
            .all(|axis| {
                let (a_min, a_max) = project(&mine, axis);
                let (b_min, b_max) = project(&theirs, axis);
                a_max.min(b_max) - a_min.max(b_min) > TOUCH
            })
    }

    /// Gap between the box and `node`; zero when they intersect.
    pub fn separation(&self, node: &NodeBox) -> f64 {
        if self.intersects(node) {
            return 0.0;
        }
        let from_mine = self
            .corners()
            .into_iter()
            .map(|c| node.distance_to_point(c));
        let from_theirs = node.corners().into_iter().map(|c| self.distance_to_point(c));
        from_mine.chain(from_theirs).fold(f64::INFINITY, f64::min)
    }
}

fn project(corners: &[DVec2; 4], axis: DVec2) -> (f64, f64) {
    corners
        .iter()
        .map(|c| c.dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| (lo.min(d), hi.max(d)))
}
