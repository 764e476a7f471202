//! Configuration error types.
//!
//! Every error here is raised while a kernel is being constructed. Once a
//! kernel exists, evaluating it at an integration point cannot fail.

use thiserror::Error;

/// Errors raised while building kernels, input sources, or geometry settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Two parallel configuration lists have different lengths.
    #[error("Length mismatch: {what} has {actual} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A direction/axis index outside {0, 1, 2}.
    #[error("Invalid direction index {0}: must be 0, 1 or 2")]
    InvalidDirection(usize),

    /// Unrecognized coordinate-system identifier.
    #[error("Unknown coordinate system '{0}' (expected XYZ, RZ or RSPHERICAL)")]
    UnknownCoordinateSystem(String),

    /// Unrecognized DG scheme name.
    #[error("Unknown DG scheme '{0}' (expected sipg, iipg or nipg)")]
    UnknownScheme(String),

    /// Unrecognized boundary flux mode.
    #[error("Unknown boundary flux '{0}' (expected advective, diffusive or flux-limited)")]
    UnknownBoundaryFlux(String),

    /// Schedule breakpoints are not in non-decreasing time order.
    #[error("Schedule times must be non-decreasing (entry {index} at t = {time})")]
    NonMonotonicSchedule { index: usize, time: f64 },

    /// A ramp duration is negative.
    #[error("Negative ramp duration {span} at schedule entry {index}")]
    NegativeTimeSpan { index: usize, span: f64 },

    /// A field needed by a kernel is not provided by the field accessor.
    #[error("Field '{0}' is not provided by the field accessor")]
    MissingField(String),

    /// A physical parameter that must be positive is not.
    #[error("Invalid parameter {name} = {value}: must be positive")]
    NonPositive { name: &'static str, value: f64 },
}

impl ConfigError {
    /// Create a length mismatch error.
    pub fn length_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            what,
            expected,
            actual,
        }
    }
}

/// Result alias for fallible construction.
pub type ConfigResult<T> = Result<T, ConfigError>;
