//! Error types with rich diagnostics using miette
//!
//! Placement itself never fails; these cover the fallible edges of the API:
//! validated construction of configuration values and reading path data.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while constructing placement inputs
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid label distance {value}: {reason}")]
    #[diagnostic(code(edgeslide::config::invalid_distance))]
    InvalidDistance { value: f64, reason: NumericError },

    #[error("invalid label angle {value}: {reason}")]
    #[diagnostic(
        code(edgeslide::config::invalid_angle),
        help("angles are given in radians")
    )]
    InvalidAngle { value: f64, reason: NumericError },

    #[error("invalid label size {width}x{height}: {reason}")]
    #[diagnostic(code(edgeslide::config::invalid_size))]
    InvalidSize {
        width: f64,
        height: f64,
        reason: NumericError,
    },

    #[error("invalid placement ratio {value}: {reason}")]
    #[diagnostic(
        code(edgeslide::config::invalid_ratio),
        help("ratios in [0, 1] lie inside a segment; other finite values extend past its ends")
    )]
    InvalidRatio { value: f64, reason: NumericError },
}

// ============================================================================
// Path Data Errors
// ============================================================================

/// Errors that occur while reading SVG path data
#[derive(Error, Diagnostic, Debug)]
pub enum PathDataError {
    #[error("malformed path data: {message}")]
    #[diagnostic(code(edgeslide::path_data::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {text}")]
    #[diagnostic(code(edgeslide::path_data::invalid_number))]
    InvalidNumber {
        text: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a number")]
        span: SourceSpan,
    },

    #[error("path data must start with a move command")]
    #[diagnostic(
        code(edgeslide::path_data::missing_move_to),
        help("begin the path with `M x y`")
    )]
    MissingMoveTo {
        #[source_code]
        src: NamedSource<String>,
        #[label("drawing command before any move")]
        span: SourceSpan,
    },
}
