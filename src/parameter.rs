//! Placement parameters: where along a path a label sits.
//!
//! One signed index covers both addressing modes. Non-negative indices count
//! segments from the source end with the ratio measured from each segment's
//! first point. Negative indices count from the target end (`-1` is the last
//! segment) with the ratio measured backwards from the target-side point.
//! Ratios in `[0, 1]` lie inside the segment; anything else is an absolute
//! distance past the 0 end (negative) or the 1 end (`ratio - 1`).

use std::fmt;

use crate::defaults;
use crate::errors::ConfigError;
use crate::types::check_finite;

/// Which side of the path a label is offered on.
///
/// `Left` applies the configured distance as is; `Right` mirrors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    /// Factor applied to the configured distance.
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacementParameter {
    pub segment_index: i32,
    pub ratio: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub side: Side,
}

impl Default for PlacementParameter {
    /// Middle of the first segment, left side.
    fn default() -> Self {
        PlacementParameter::from_source(0, defaults::DEFAULT_RATIO)
    }
}

impl PlacementParameter {
    /// Segment `segment` counted from the source, `ratio` from its first point.
    pub fn from_source(segment: usize, ratio: f64) -> Self {
        PlacementParameter {
            segment_index: clamp_index(segment),
            ratio,
            side: Side::Left,
        }
    }

    /// Segment `segment` counted from the target (0 is the last segment),
    /// `ratio` measured backwards from its target-side point.
    pub fn from_target(segment: usize, ratio: f64) -> Self {
        PlacementParameter {
            segment_index: -1 - clamp_index(segment),
            ratio,
            side: Side::Left,
        }
    }

    /// Create a parameter from raw parts, rejecting non-finite ratios.
    pub fn try_new(segment_index: i32, ratio: f64) -> Result<Self, ConfigError> {
        let ratio = check_finite(ratio)
            .map_err(|reason| ConfigError::InvalidRatio { value: ratio, reason })?;
        Ok(PlacementParameter {
            segment_index,
            ratio,
            side: Side::Left,
        })
    }

    pub fn with_side(self, side: Side) -> Self {
        PlacementParameter { side, ..self }
    }

    pub fn is_from_target(&self) -> bool {
        self.segment_index < 0
    }

    /// Segment position counted from whichever end the parameter is relative to.
    pub fn relative_segment(&self) -> usize {
        if self.segment_index >= 0 {
            self.segment_index as usize
        } else {
            (-1 - i64::from(self.segment_index)) as usize
        }
    }

    /// Whether the ratio extends past the segment ends.
    pub fn is_absolute(&self) -> bool {
        !(0.0..=1.0).contains(&self.ratio)
    }

    /// Resolve to a from-source segment index and ratio on a path with
    /// `segment_count` segments (at least one).
    ///
    /// Out-of-range indices clamp to the nearest segment. The from-target ratio
    /// `r` becomes `1 - r`, which maps the in-segment fraction and the
    /// absolute extension alike.
    pub(crate) fn canonical(&self, segment_count: usize) -> (usize, f64) {
        let last = segment_count.saturating_sub(1);
        let relative = self.relative_segment();
        if relative > last {
            crate::log::debug!(
                segment_index = self.segment_index,
                segment_count,
                "placement parameter outside path, clamping"
            );
        }
        let relative = relative.min(last);
        if self.is_from_target() {
            (last - relative, 1.0 - self.ratio)
        } else {
            (relative, self.ratio)
        }
    }

    /// Encode a from-source position the way the finder and enumerator
    /// report it: segments in the source half of the path stay
    /// source-relative, the rest become target-relative.
    pub(crate) fn encode(index: usize, ratio: f64, segment_count: usize, side: Side) -> Self {
        let parameter = if 2 * index + 1 > segment_count {
            PlacementParameter::from_target(segment_count - 1 - index, 1.0 - ratio)
        } else {
            PlacementParameter::from_source(index, ratio)
        };
        parameter.with_side(side)
    }

    /// Same position, addressed from the source end.
    pub fn to_source_relative(&self, segment_count: usize) -> Self {
        let (index, ratio) = self.canonical(segment_count);
        PlacementParameter::from_source(index, ratio).with_side(self.side)
    }

    /// Same position, addressed from the target end.
    pub fn to_target_relative(&self, segment_count: usize) -> Self {
        let (index, ratio) = self.canonical(segment_count);
        let last = segment_count.saturating_sub(1);
        PlacementParameter::from_target(last - index, 1.0 - ratio).with_side(self.side)
    }
}

fn clamp_index(segment: usize) -> i32 {
    i32::try_from(segment).unwrap_or(i32::MAX)
}

impl fmt::Display for PlacementParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = if self.is_from_target() { "target" } else { "source" };
        write!(
            f,
            "{} segment {} @ {} ({})",
            origin,
            self.relative_segment(),
            self.ratio,
            self.side
        )
    }
}
