#![forbid(unsafe_code)]
//! Edge label placement geometry.
//!
//! Labels slide along the polyline of a graph edge. A [`PlacementParameter`]
//! names a segment and a ratio along it; [`resolve`] turns it into the
//! rotated box the label occupies, [`find_best_parameter`] maps a dragged box
//! back to the closest parameter, and [`enumerate_candidates`] lists the
//! positions a picker should offer.
//!
//! ```
//! use edgeslide::{Edge, ModelConfiguration, PlacementParameter, Size, resolve};
//! use glam::dvec2;
//!
//! let edge = Edge::new(vec![dvec2(0.0, 0.0), dvec2(100.0, 0.0)]);
//! let config = ModelConfiguration::default();
//! let placed = resolve(&PlacementParameter::default(), Size::new(40.0, 10.0), &edge, &config);
//! assert!(placed.center().abs_diff_eq(dvec2(50.0, 0.0), 1e-9));
//! ```

pub mod config;
pub mod defaults;
pub mod edge;
pub mod errors;
pub mod log;
pub mod parameter;
pub mod path;
pub mod path_data;
pub mod placement;
pub mod types;

pub use config::{ModelConfiguration, SideMode};
pub use edge::Edge;
pub use errors::{ConfigError, PathDataError};
pub use parameter::{PlacementParameter, Side};
pub use path::{Path, PathCommand, Segment, sample_path};
pub use path_data::parse_path_data;
pub use placement::{enumerate_candidates, find_best_parameter, resolve};
pub use types::{NodeBox, NumericError, OrientedBox, Size};
