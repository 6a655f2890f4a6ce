//! Default distances, tolerances and settings (world units unless noted)

/// Minimum gap kept between a label and the node its edge end attaches to.
pub const NODE_LABEL_CLEARANCE: f64 = 5.0;

/// Two path points closer than this make a two-point path degenerate.
pub const DEGENERATE_PATH_EPSILON: f64 = 1e-4;

/// Segments shorter than this have no usable direction of their own.
pub const SEGMENT_EPSILON: f64 = 1e-6;

/// Absolute ratios found by the finder stay at least this far from 0 and 1.
pub const RATIO_EPSILON: f64 = 1e-9;

/// Most in-between candidates offered on one side of one segment.
pub const MAX_INTERMEDIATE_CANDIDATES: usize = 32;

/// Ratio used by the default parameter (middle of the first segment).
pub const DEFAULT_RATIO: f64 = 0.5;

/// Default label distance from the edge path.
pub const DISTANCE: f64 = 0.0;

/// Default extra label rotation, in radians.
pub const ANGLE: f64 = 0.0;
