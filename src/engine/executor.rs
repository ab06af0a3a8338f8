//! Execution engine for collocation runs.
//!
//! ## Purpose
//!
//! This module drives the per-element matchers of the algorithms layer over
//! whole collections and assembles the resulting [`MatchSet`].
//!
//! ## Design notes
//!
//! * **Sharding**: Elements of the driving collection are independent, so the
//!   scan may run on the rayon pool when the `parallel` feature is enabled.
//! * **Ordering**: The parallel path collects in index order; results are
//!   identical to the sequential path.
//! * **Graceful degradation**: Collections without coordinates and grids that
//!   cannot be sampled produce empty match sets.
//!
//! ## Invariants
//!
//! * Output order follows the driving collection.
//! * The executor never alters the tolerances it is given.
//!
//! ## Non-goals
//!
//! * This module does not validate tolerances (see `validator`).
//! * No cancellation or timeouts; callers wrap the call.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::algorithms::collocation::{CollocationWindow, PointColumns, match_one};
use crate::algorithms::grid_sampling::{is_sampleable, sample_one};
use crate::primitives::grid::GriddedField;
use crate::primitives::matches::MatchSet;
use crate::primitives::observation::ObservationSet;

// ============================================================================
// Executor
// ============================================================================

/// Runs the matchers over whole collections.
pub struct CollocationExecutor;

impl CollocationExecutor {
    /// Evaluate `f` for every index in `0..n`, keeping `Some` results in
    /// index order.
    ///
    /// `parallel` is honoured only when the `parallel` feature is enabled.
    pub fn run<R, F>(n: usize, parallel: bool, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> Option<R> + Send + Sync,
    {
        if parallel {
            return Self::run_parallel(n, f);
        }

        (0..n).filter_map(f).collect()
    }

    #[cfg(feature = "parallel")]
    fn run_parallel<R, F>(n: usize, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> Option<R> + Send + Sync,
    {
        (0..n).into_par_iter().filter_map(f).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn run_parallel<R, F>(n: usize, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> Option<R> + Send + Sync,
    {
        debug!("parallel execution requested without the `parallel` feature; running sequentially");
        (0..n).filter_map(f).collect()
    }

    /// Point-to-point collocation of `a` against `b`.
    pub fn collocate_points<T>(
        a: &ObservationSet<T>,
        b: &ObservationSet<T>,
        window: &CollocationWindow<T>,
        parallel: bool,
    ) -> MatchSet<T>
    where
        T: Float + Send + Sync,
    {
        let (Some(cols_a), Some(cols_b)) = (PointColumns::of(a), PointColumns::of(b)) else {
            debug!("point collocation skipped: collection without coordinates");
            return MatchSet::empty();
        };

        if cols_a.is_empty() || cols_b.is_empty() {
            return MatchSet::empty();
        }

        let matches = Self::run(cols_a.len(), parallel, |i| {
            match_one(&cols_a, &cols_b, i, window)
        });

        debug!(
            n_a = cols_a.len(),
            n_b = cols_b.len(),
            matches = matches.len(),
            "point collocation finished"
        );
        MatchSet::from(matches)
    }

    /// Point-to-grid collocation of `points` against `grid_var` of `grid`.
    pub fn collocate_grid<T>(
        points: &ObservationSet<T>,
        grid: &GriddedField<T>,
        grid_var: &str,
        window: &CollocationWindow<T>,
        parallel: bool,
    ) -> MatchSet<T>
    where
        T: Float + Send + Sync,
    {
        let Some(cols) = PointColumns::of(points) else {
            debug!("grid collocation skipped: points without coordinates");
            return MatchSet::empty();
        };

        if !is_sampleable(grid, grid_var) {
            debug!(grid_var, "grid collocation skipped: missing axis or variable");
            return MatchSet::empty();
        }

        let matches = Self::run(cols.len(), parallel, |i| {
            sample_one(&cols, grid, grid_var, i, window)
        });

        debug!(
            n_points = cols.len(),
            grid_var,
            matches = matches.len(),
            "grid collocation finished"
        );
        MatchSet::from(matches)
    }
}
