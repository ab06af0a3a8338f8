//! Stable argmin and per-axis nearest-index search.
//!
//! ## Purpose
//!
//! Both matchers select a single best candidate from a brute-force scan.
//! This module provides the selection primitives so the tie-break policy is
//! defined in exactly one place.
//!
//! ## Key concepts
//!
//! * **Stable argmin**: On equal keys the earliest candidate wins.
//! * **Per-axis nearest**: Nearest index along a single 1-D axis.
//!
//! ## Invariants
//!
//! * NaN keys never win against a finite key.
//! * An empty scan yields `None`.

// External dependencies
use num_traits::Float;

/// Position and key of the smallest key, keeping the first on ties.
///
/// NaN keys are skipped.
#[inline]
pub fn stable_argmin<T, I>(keys: I) -> Option<(usize, T)>
where
    T: PartialOrd + Copy,
    I: IntoIterator<Item = (usize, T)>,
{
    let mut best: Option<(usize, T)> = None;
    for (idx, key) in keys {
        // Self-comparison rejects NaN.
        if key.partial_cmp(&key).is_none() {
            continue;
        }
        match best {
            Some((_, b)) if key >= b => {}
            _ => best = Some((idx, key)),
        }
    }
    best
}

/// Index of the axis value closest to `target`.
///
/// Returns `None` for an empty axis, an all-NaN axis or a NaN target.
#[inline]
pub fn nearest_index<T: Float>(axis: &[T], target: T) -> Option<usize> {
    stable_argmin(axis.iter().map(|&v| (v - target).abs()).enumerate()).map(|(i, _)| i)
}
