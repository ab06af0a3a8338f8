//! # aqfusion — Observation Fusion and Air-Quality Scoring for Rust
//!
//! Deterministic numeric core for fusing environmental observations from
//! independently sampled sources and scoring them against each other.
//!
//! ## What does it do?
//!
//! Two pure, stateless transformations over in-memory arrays:
//!
//! 1. **Collocation**: pair every observation of a driving source `A` with
//!    the nearest observation of a second source `B` (or the nearest cell of
//!    a gridded field) inside a spatial radius and a temporal window.
//! 2. **AQI**: turn raw pollutant concentrations into EPA-style sub-indices
//!    through piecewise-linear breakpoint tables, and combine them into a
//!    composite index attributed to its dominant pollutant.
//!
//! Collocated pairs are scored with bias, RMSE and a guarded Pearson
//! correlation.
//!
//! **Common applications:**
//! - Validating low-cost sensors against reference monitors
//! - Comparing satellite or model grids with ground stations
//! - Reporting a single health index from a set of pollutant readings
//!
//! ## Quick Start
//!
//! ### Point-to-point collocation
//!
//! ```rust
//! use aqfusion::prelude::*;
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
//!
//! // Reference monitors (A) and low-cost sensors (B)
//! let monitors: ObservationSet = vec![
//!     Observation::new(t0, 40.7128, -74.0060, 31.0),
//!     Observation::new(t0, 34.0522, -118.2437, 12.0),
//! ]
//! .into();
//! let sensors: ObservationSet = vec![
//!     Observation::new(t0 + Duration::minutes(20), 40.7200, -74.0000, 33.5),
//! ]
//! .into();
//!
//! // Build the collocator
//! let collocator = Collocation::new()
//!     .max_km(5.0)       // Spatial tolerance
//!     .max_minutes(30)   // Temporal tolerance
//!     .build()?;
//!
//! let matches = collocator.collocate(&monitors, &sensors);
//! assert_eq!(matches.len(), 1);
//!
//! let metrics = collocator.metrics(&matches);
//! println!("{}", metrics);
//! # Result::<(), FusionError>::Ok(())
//! ```
//!
//! ```text
//! Agreement Metrics:
//!   Matches: 1
//!   Bias:    2.500000
//!   RMSE:    2.500000
//!   Corr:    0.000000
//! ```
//!
//! A single pair has no variance, so the correlation reports the
//! `ReturnZero` sentinel instead of NaN.
//!
//! ### Point-to-grid collocation
//!
//! ```rust
//! use aqfusion::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
//! let points: ObservationSet = vec![Observation::new(t0, 10.2, 20.9, 4.0)].into();
//!
//! // 2 x 2 lattice without a time axis
//! let grid = GriddedField::new(vec![10.0, 11.0], vec![20.0, 21.0])
//!     .with_variable("no2", vec![1.0, 2.0, 3.0, 4.0])?;
//!
//! let matches = collocate_points_with_grid(&points, &grid, "no2", 50.0, 60)?;
//! assert_eq!(matches[0].b_value, 2.0); // cell (10.0, 21.0)
//! # Result::<(), FusionError>::Ok(())
//! ```
//!
//! ### Composite AQI
//!
//! ```rust
//! use aqfusion::prelude::*;
//!
//! let result = compute_composite([("pm25", 40.0_f64), ("no2", 10.0)], None);
//!
//! assert_eq!(result.value, 112.0);
//! assert_eq!(result.category, AqiCategory::UnhealthySensitive);
//! assert_eq!(result.dominant_pollutant, "pm25");
//! ```
//!
//! ## Parameters
//!
//! | Parameter              | Default        | Range/Options            | Description                              |
//! |------------------------|----------------|--------------------------|------------------------------------------|
//! | **max_km**             | 25.0           | [0, ∞), finite           | Maximum great-circle distance            |
//! | **max_minutes**        | 60             | [0, ∞)                   | Maximum absolute time gap                |
//! | **grid_variable**      | `"no2"`        | any attached variable    | Variable sampled by grid collocation     |
//! | **correlation_policy** | `ReturnZero`   | `ReturnZero`, `ReturnNan`| Correlation of a constant series         |
//! | **parallel**           | false          | true/false               | Shard the scan over rayon (feature)      |
//!
//! Setting a parameter twice is reported by `.build()` as
//! [`FusionError::DuplicateParameter`](prelude::FusionError).
//!
//! ## Error handling
//!
//! Missing data is never an error: empty inputs, collections without
//! coordinates, grids without an axis or without the requested variable all
//! produce an empty [`MatchSet`](prelude::MatchSet). Errors are reserved for
//! contract violations (negative tolerances, malformed breakpoint tables,
//! mismatched column lengths), each classified by
//! [`ErrorKind`](prelude::ErrorKind).
//!
//! ## Feature flags
//!
//! - `parallel`: run the per-observation scan on the rayon thread pool.
//! - `serde`: `Serialize`/`Deserialize` for the data types.
//! - `dev`: expose the internal layers for tests and benchmarks.
//!
//! ## Logging
//!
//! The crate emits `tracing` events: a `debug!` summary per collocation
//! call, `trace!` for skipped rows and `warn!` for ignored unit overrides.
//! Install any subscriber to see them.

#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures.
//
// Contains the error type, observation collections, gridded fields and
// match sets.
mod primitives;

// Layer 2: Math - pure numeric helpers.
//
// Contains the haversine distance, stable nearest-neighbour selection,
// NaN-aware means, guarded correlation and half-to-even rounding.
mod math;

// Layer 3: Algorithms - per-element matchers and the AQI calculator.
//
// Contains the point-to-point matcher, the grid cell sampler and the
// breakpoint tables.
mod algorithms;

// Layer 4: Evaluation - agreement metrics.
//
// Contains bias, RMSE and correlation over match sets.
mod evaluation;

// Layer 5: Engine - validation and orchestration.
//
// Contains tolerance validation and sequential/parallel dispatch of the
// matchers over whole collections.
mod engine;

// Layer 6: API - high-level fluent API.
//
// Provides the `Collocation` builder and free-function entry points.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard aqfusion prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use aqfusion::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algorithms::collocation::CollocationWindow;
    pub use crate::api::{
        AgreementMetrics, AqiCategory, AqiResult, Breakpoint, BreakpointTable,
        CollocationBuilder as Collocation, Collocator, ConcentrationUnit, DEFAULT_MAX_KM,
        DEFAULT_MAX_MINUTES, ErrorKind, FusionError, GriddedField, Match, MatchSet, Observation,
        ObservationSet, Pollutant, ZeroVarianceCorrelationPolicy, aqi_no2_1h, aqi_o3_8h,
        aqi_pm10, aqi_pm25, collocate, collocate_points_with_grid, compute_composite,
        compute_metrics, haversine, haversine_many, sub_indices,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal matchers and AQI tables.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal agreement metrics.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
