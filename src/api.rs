//! High-level API for collocation and scoring.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points: a fluent
//! builder that produces a validated [`Collocator`], and free functions for
//! one-off calls.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with the service defaults (25 km, 60 min,
//!   grid variable `no2`).
//! * **Validated**: Tolerances are validated once, when `.build()` is called.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`CollocationBuilder`] via `Collocation::new()`.
//! 2. Chain configuration methods (`.max_km()`, `.max_minutes()`, etc.).
//! 3. Call `.build()` to obtain a [`Collocator`].
//! 4. Run `.collocate()` or `.collocate_with_grid()`, then `.metrics()`.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::collocation::CollocationWindow;
use crate::algorithms::grid_sampling::DEFAULT_GRID_VARIABLE;
use crate::engine::executor::CollocationExecutor;
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::aqi::{
    AqiCategory, AqiResult, Breakpoint, BreakpointTable, ConcentrationUnit, Pollutant, aqi_no2_1h,
    aqi_o3_8h, aqi_pm10, aqi_pm25, compute_composite, sub_indices,
};
pub use crate::evaluation::metrics::{AgreementMetrics, compute_metrics};
pub use crate::math::geodesic::{haversine, haversine_many};
pub use crate::math::stats::ZeroVarianceCorrelationPolicy;
pub use crate::primitives::errors::{ErrorKind, FusionError};
pub use crate::primitives::grid::GriddedField;
pub use crate::primitives::matches::{Match, MatchSet};
pub use crate::primitives::observation::{Observation, ObservationSet};

/// Default spatial tolerance in kilometres.
pub const DEFAULT_MAX_KM: f64 = 25.0;

/// Default temporal tolerance in minutes.
pub const DEFAULT_MAX_MINUTES: i64 = 60;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring collocation runs.
#[derive(Debug, Clone)]
pub struct CollocationBuilder<T: Float> {
    /// Spatial tolerance in kilometres.
    pub max_km: Option<T>,

    /// Temporal tolerance in whole minutes.
    pub max_minutes: Option<i64>,

    /// Grid variable sampled by `collocate_with_grid`.
    pub grid_variable: Option<String>,

    /// Correlation result for constant series.
    pub correlation_policy: Option<ZeroVarianceCorrelationPolicy>,

    /// Parallel execution hint.
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for CollocationBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> CollocationBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            max_km: None,
            max_minutes: None,
            grid_variable: None,
            correlation_policy: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the spatial tolerance in kilometres (default 25).
    pub fn max_km(mut self, max_km: T) -> Self {
        if self.max_km.is_some() {
            self.duplicate_param = Some("max_km");
        }
        self.max_km = Some(max_km);
        self
    }

    /// Set the temporal tolerance in whole minutes (default 60).
    pub fn max_minutes(mut self, max_minutes: i64) -> Self {
        if self.max_minutes.is_some() {
            self.duplicate_param = Some("max_minutes");
        }
        self.max_minutes = Some(max_minutes);
        self
    }

    /// Set the grid variable sampled by point-to-grid runs (default `no2`).
    pub fn grid_variable(mut self, name: impl Into<String>) -> Self {
        if self.grid_variable.is_some() {
            self.duplicate_param = Some("grid_variable");
        }
        self.grid_variable = Some(name.into());
        self
    }

    /// Set the correlation result for constant series.
    pub fn correlation_policy(mut self, policy: ZeroVarianceCorrelationPolicy) -> Self {
        if self.correlation_policy.is_some() {
            self.duplicate_param = Some("correlation_policy");
        }
        self.correlation_policy = Some(policy);
        self
    }

    /// Run the per-element scan on the rayon pool (needs the `parallel` feature).
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }

    /// Validate the configuration and build a [`Collocator`].
    pub fn build(self) -> Result<Collocator<T>, FusionError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let max_km = match self.max_km {
            Some(km) => km,
            None => T::from(DEFAULT_MAX_KM).unwrap_or_else(T::nan),
        };
        let window =
            Validator::validate_window(max_km, self.max_minutes.unwrap_or(DEFAULT_MAX_MINUTES))?;

        Ok(Collocator {
            window,
            grid_variable: self
                .grid_variable
                .unwrap_or_else(|| DEFAULT_GRID_VARIABLE.to_owned()),
            correlation_policy: self.correlation_policy.unwrap_or_default(),
            parallel: self.parallel.unwrap_or(false),
        })
    }
}

// ============================================================================
// Collocator
// ============================================================================

/// Validated collocation configuration.
#[derive(Debug, Clone)]
pub struct Collocator<T: Float> {
    window: CollocationWindow<T>,
    grid_variable: String,
    correlation_policy: ZeroVarianceCorrelationPolicy,
    parallel: bool,
}

impl<T: Float + Send + Sync> Collocator<T> {
    /// Tolerances in effect.
    pub fn window(&self) -> CollocationWindow<T> {
        self.window
    }

    /// Grid variable sampled by [`collocate_with_grid`](Self::collocate_with_grid).
    pub fn grid_variable(&self) -> &str {
        &self.grid_variable
    }

    /// Match each observation of `a` with its nearest in-window partner in `b`.
    pub fn collocate(&self, a: &ObservationSet<T>, b: &ObservationSet<T>) -> MatchSet<T> {
        CollocationExecutor::collocate_points(a, b, &self.window, self.parallel)
    }

    /// Match each point with the configured variable of `grid`.
    pub fn collocate_with_grid(
        &self,
        points: &ObservationSet<T>,
        grid: &GriddedField<T>,
    ) -> MatchSet<T> {
        self.collocate_with_grid_var(points, grid, &self.grid_variable)
    }

    /// Match each point with `grid_var` of `grid`.
    pub fn collocate_with_grid_var(
        &self,
        points: &ObservationSet<T>,
        grid: &GriddedField<T>,
        grid_var: &str,
    ) -> MatchSet<T> {
        CollocationExecutor::collocate_grid(points, grid, grid_var, &self.window, self.parallel)
    }

    /// Agreement metrics under the configured correlation policy.
    pub fn metrics(&self, matches: &MatchSet<T>) -> AgreementMetrics<T> {
        AgreementMetrics::compute(matches.as_slice(), self.correlation_policy)
    }
}

// ============================================================================
// One-off Entry Points
// ============================================================================

/// Point-to-point collocation with explicit tolerances.
///
/// Fails only for a negative or non-finite `max_km` or a negative
/// `max_minutes`; an empty result is not an error.
pub fn collocate<T: Float + Send + Sync>(
    a: &ObservationSet<T>,
    b: &ObservationSet<T>,
    max_km: T,
    max_minutes: i64,
) -> Result<MatchSet<T>, FusionError> {
    let window = Validator::validate_window(max_km, max_minutes)?;
    Ok(CollocationExecutor::collocate_points(a, b, &window, false))
}

/// Point-to-grid collocation with explicit tolerances.
///
/// Points without coordinates, grids with an empty axis and unknown
/// variables yield an empty set.
pub fn collocate_points_with_grid<T: Float + Send + Sync>(
    points: &ObservationSet<T>,
    grid: &GriddedField<T>,
    grid_var: &str,
    max_km: T,
    max_minutes: i64,
) -> Result<MatchSet<T>, FusionError> {
    let window = Validator::validate_window(max_km, max_minutes)?;
    Ok(CollocationExecutor::collocate_grid(
        points, grid, grid_var, &window, false,
    ))
}
