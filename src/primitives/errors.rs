//! Error types for observation fusion.
//!
//! ## Purpose
//!
//! This module defines the single error type returned by the crate. Errors
//! are reserved for caller contract violations: invalid thresholds, malformed
//! breakpoint tables, repeated builder settings and inconsistent column
//! lengths.
//!
//! ## Design notes
//!
//! * **Data absence is not an error**: empty windows, missing axes and empty
//!   inputs produce empty results instead.
//! * **Kinds**: every variant maps onto an [`ErrorKind`] so callers can branch
//!   on the class of failure without matching each variant.
//!
//! ## Non-goals
//!
//! * This module does not report numerical degeneracies (zero variance, no
//!   recognised pollutant); those have sentinel results.

use thiserror::Error;

/// Broad classification of a [`FusionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A parameter is outside its admissible range.
    InvalidArgument,

    /// Input arrays disagree on shape or length.
    InconsistentInput,
}

/// Errors produced by collocation, grid construction and AQI table setup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FusionError {
    /// Spatial tolerance is negative or not finite.
    #[error("Invalid max_km: {0} (must be >= 0 and finite)")]
    InvalidDistanceThreshold(f64),

    /// Temporal tolerance is negative.
    #[error("Invalid max_minutes: {0} (must be >= 0)")]
    InvalidTimeWindow(i64),

    /// A builder parameter was configured more than once.
    #[error("Parameter '{parameter}' was set multiple times. Each parameter can only be configured once.")]
    DuplicateParameter {
        /// Name of the parameter.
        parameter: &'static str,
    },

    /// A breakpoint table violates its ordering or range constraints.
    #[error("Invalid breakpoint table: {0}")]
    InvalidBreakpoints(String),

    /// Columns of an observation collection have different lengths.
    #[error("Length mismatch: column '{column}' has {got} entries, expected {expected}")]
    MismatchedColumns {
        /// Name of the offending column.
        column: &'static str,
        /// Length of the reference (time) column.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// A grid variable does not match the lattice shape.
    #[error("Grid shape mismatch: variable '{variable}' has {got} cells, lattice has {expected}")]
    GridShapeMismatch {
        /// Variable name.
        variable: String,
        /// `n_time * n_lat * n_lon`.
        expected: usize,
        /// Actual data length.
        got: usize,
    },
}

impl FusionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FusionError::InvalidDistanceThreshold(_)
            | FusionError::InvalidTimeWindow(_)
            | FusionError::DuplicateParameter { .. }
            | FusionError::InvalidBreakpoints(_) => ErrorKind::InvalidArgument,
            FusionError::MismatchedColumns { .. } | FusionError::GridShapeMismatch { .. } => {
                ErrorKind::InconsistentInput
            }
        }
    }
}
