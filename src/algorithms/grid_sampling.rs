//! Point-to-grid collocation.
//!
//! ## Purpose
//!
//! This module samples a gridded field at the cell nearest to each point
//! observation, producing one match per point whose cell lies within the
//! spatial radius and, for time-resolved grids, whose nearest time step lies
//! within the temporal window.
//!
//! ## Design notes
//!
//! * **Per-axis lookup**: The latitude and longitude indices are chosen
//!   independently as the nearest value on each axis. On non-uniform axes the
//!   selected cell is not necessarily the nearest cell by true distance.
//! * **Time selection**: The grid time step with the smallest gap is used,
//!   provided at least one step falls inside the window.
//! * **Graceful degradation**: Missing coordinates, empty axes and unknown
//!   variables produce no matches rather than errors.
//!
//! ## Invariants
//!
//! * Every match carries `b_time = None`; the grid time is implicit.
//! * Every emitted match satisfies both tolerances.
//!
//! ## Non-goals
//!
//! * No true 2-D nearest-cell search.
//! * No interpolation between cells or time steps.

// External dependencies
use num_traits::Float;
use tracing::trace;

// Internal dependencies
use crate::algorithms::collocation::{CollocationWindow, PointColumns, minutes_apart};
use crate::math::geodesic::haversine;
use crate::math::nearest::{nearest_index, stable_argmin};
use crate::primitives::grid::GriddedField;
use crate::primitives::matches::Match;

/// Default grid variable sampled when none is named.
pub const DEFAULT_GRID_VARIABLE: &str = "no2";

// ============================================================================
// Cell Selection
// ============================================================================

/// Indices of the grid cell selected for one point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellIndex {
    /// Time step, present only for time-resolved grids.
    pub time: Option<usize>,

    /// Latitude index.
    pub lat: usize,

    /// Longitude index.
    pub lon: usize,
}

/// Whether `grid` can be sampled for `grid_var` at all.
#[inline]
pub fn is_sampleable<T: Float>(grid: &GriddedField<T>, grid_var: &str) -> bool {
    !grid.lat().is_empty() && !grid.lon().is_empty() && grid.has_variable(grid_var)
}

/// Select the cell for element `i` of `points`.
///
/// Returns the cell and the distance to its centre, or `None` when the point
/// is unusable, no time step is inside the window, or the cell centre is
/// beyond the radius.
pub fn select_cell<T: Float>(
    points: &PointColumns<'_, T>,
    grid: &GriddedField<T>,
    i: usize,
    window: &CollocationWindow<T>,
) -> Option<(CellIndex, T)> {
    if !points.is_usable(i) {
        trace!(index = i, "skipping non-finite point");
        return None;
    }

    let t = points.time[i];
    let time = match grid.time() {
        Some(axis) => {
            let (j_t, gap) = stable_argmin(axis.iter().map(|&g| minutes_apart(t, g)).enumerate())?;
            if !window.admits_gap(gap) {
                trace!(index = i, gap, "no grid time step inside window");
                return None;
            }
            Some(j_t)
        }
        None => None,
    };

    let (lat, lon) = (points.lat[i], points.lon[i]);
    let j_lat = nearest_index(grid.lat(), lat)?;
    let j_lon = nearest_index(grid.lon(), lon)?;

    let distance_km = haversine(lat, lon, grid.lat()[j_lat], grid.lon()[j_lon]);
    if !window.admits_distance(distance_km) {
        trace!(index = i, "nearest cell outside radius");
        return None;
    }

    Some((
        CellIndex {
            time,
            lat: j_lat,
            lon: j_lon,
        },
        distance_km,
    ))
}

/// Resolve the grid match for element `i` of `points`, if any.
pub fn sample_one<T: Float>(
    points: &PointColumns<'_, T>,
    grid: &GriddedField<T>,
    grid_var: &str,
    i: usize,
    window: &CollocationWindow<T>,
) -> Option<Match<T>> {
    let (cell, distance_km) = select_cell(points, grid, i, window)?;
    let b_value = grid.sample(grid_var, cell.time, cell.lat, cell.lon)?;

    Some(Match {
        a_value: points.value[i],
        b_value,
        distance_km,
        a_time: points.time[i],
        b_time: None,
    })
}
