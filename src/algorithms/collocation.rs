//! Point-to-point spatiotemporal collocation.
//!
//! ## Purpose
//!
//! This module pairs each observation of a driving collection `A` with at
//! most one observation of a second collection `B` that lies within a
//! temporal window and a spatial radius.
//!
//! ## Design notes
//!
//! * **Brute force**: Every `a` scans all of `B` (O(n·m)); no spatial index.
//! * **Selection**: Nearest in distance among the candidates inside the time
//!   window, not nearest in time among candidates inside the radius.
//! * **Reuse**: A `B` element may be matched by several `A` elements.
//! * **Independence**: Each `a` is resolved on its own, so the scan can be
//!   sharded across threads without changing the result.
//!
//! ## Key concepts
//!
//! * **Time gap**: Absolute difference in whole minutes, truncated toward zero.
//! * **Usable row**: Finite value and finite coordinates.
//!
//! ## Invariants
//!
//! * At most one match per element of `A`, emitted in `A`'s order.
//! * Every emitted match satisfies both tolerances.
//! * Distance ties resolve to the earliest candidate in `B`'s order.
//!
//! ## Non-goals
//!
//! * No exclusive (bipartite optimal) assignment.
//! * No incremental update of a previous match set.

// External dependencies
use chrono::{DateTime, Utc};
use num_traits::Float;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::geodesic::haversine;
use crate::math::nearest::stable_argmin;
use crate::primitives::matches::Match;
use crate::primitives::observation::ObservationSet;

// ============================================================================
// Tolerance Window
// ============================================================================

/// Spatial and temporal tolerances for a collocation run.
///
/// Constructed by the API layer after validation; the algorithms assume both
/// bounds are non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollocationWindow<T> {
    /// Maximum great-circle distance in kilometres.
    pub max_km: T,

    /// Maximum absolute time gap in whole minutes.
    pub max_minutes: i64,
}

impl<T: Float> CollocationWindow<T> {
    /// Whether a time gap in minutes is inside the window.
    #[inline]
    pub fn admits_gap(&self, minutes: i64) -> bool {
        minutes <= self.max_minutes
    }

    /// Whether a distance is inside the window.
    #[inline]
    pub fn admits_distance(&self, km: T) -> bool {
        km <= self.max_km
    }
}

/// Absolute time gap between two instants in whole minutes, truncated.
#[inline]
pub fn minutes_apart(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    (a - b).num_minutes().saturating_abs()
}

// ============================================================================
// Point-to-Point Matcher
// ============================================================================

/// Borrowed columns of a located observation collection.
#[derive(Debug, Clone, Copy)]
pub struct PointColumns<'a, T> {
    /// Time column.
    pub time: &'a [DateTime<Utc>],
    /// Latitude column.
    pub lat: &'a [T],
    /// Longitude column.
    pub lon: &'a [T],
    /// Value column.
    pub value: &'a [T],
}

impl<'a, T: Float> PointColumns<'a, T> {
    /// Borrow the columns of `set`, or `None` when it has no coordinates.
    pub fn of(set: &'a ObservationSet<T>) -> Option<Self> {
        let (lat, lon) = set.coordinates()?;
        Some(Self {
            time: set.times(),
            lat,
            lon,
            value: set.values(),
        })
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether there are no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Finite value and finite position.
    #[inline]
    pub fn is_usable(&self, i: usize) -> bool {
        self.value[i].is_finite() && self.lat[i].is_finite() && self.lon[i].is_finite()
    }
}

/// Resolve the match for element `i` of `a`, if any.
///
/// Candidates are the usable rows of `b` inside the time window; the
/// nearest one is kept when it also lies inside the radius.
pub fn match_one<T: Float>(
    a: &PointColumns<'_, T>,
    b: &PointColumns<'_, T>,
    i: usize,
    window: &CollocationWindow<T>,
) -> Option<Match<T>> {
    if !a.is_usable(i) {
        trace!(index = i, "skipping non-finite observation");
        return None;
    }

    let (lat, lon, t) = (a.lat[i], a.lon[i], a.time[i]);
    let candidates = (0..b.len())
        .filter(|&j| b.is_usable(j) && window.admits_gap(minutes_apart(t, b.time[j])))
        .map(|j| (j, haversine(lat, lon, b.lat[j], b.lon[j])));

    let (j, distance_km) = stable_argmin(candidates)?;
    if !window.admits_distance(distance_km) {
        return None;
    }

    Some(Match {
        a_value: a.value[i],
        b_value: b.value[j],
        distance_km,
        a_time: t,
        b_time: Some(b.time[j]),
    })
}
