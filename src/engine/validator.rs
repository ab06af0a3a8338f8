//! Input validation for collocation parameters.
//!
//! ## Purpose
//!
//! This module checks caller-supplied tolerances before any matching is
//! attempted, so contract violations fail fast with a typed error instead of
//! silently producing an empty result.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * Validated tolerances are finite and non-negative.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not validate data content; missing or non-finite
//!   observations are handled by the matchers.
//! * This module does not provide automatic correction of invalid inputs.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::collocation::CollocationWindow;
use crate::primitives::errors::FusionError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for collocation parameters.
///
/// Provides static methods that return `Result<(), FusionError>` and fail
/// fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    /// Validate the spatial tolerance in kilometres.
    pub fn validate_max_km<T: Float>(max_km: T) -> Result<(), FusionError> {
        if !max_km.is_finite() || max_km < T::zero() {
            return Err(FusionError::InvalidDistanceThreshold(
                max_km.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the temporal tolerance in minutes.
    pub fn validate_max_minutes(max_minutes: i64) -> Result<(), FusionError> {
        if max_minutes < 0 {
            return Err(FusionError::InvalidTimeWindow(max_minutes));
        }
        Ok(())
    }

    /// Validate both tolerances and assemble the window.
    pub fn validate_window<T: Float>(
        max_km: T,
        max_minutes: i64,
    ) -> Result<CollocationWindow<T>, FusionError> {
        Self::validate_max_minutes(max_minutes)?;
        Self::validate_max_km(max_km)?;
        Ok(CollocationWindow {
            max_km,
            max_minutes,
        })
    }

    /// Validate that no parameter was set twice on a builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), FusionError> {
        match duplicate_param {
            Some(param) => Err(FusionError::DuplicateParameter { parameter: param }),
            None => Ok(()),
        }
    }
}
