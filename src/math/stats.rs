//! Summary statistics for paired series.
//!
//! ## Purpose
//!
//! This module provides the NaN-aware mean and the guarded Pearson
//! correlation used by the agreement metrics.
//!
//! ## Design notes
//!
//! * **NaN skipping**: Non-finite entries are excluded from means.
//! * **Guarded correlation**: Correlation of a constant series is defined by
//!   a named policy instead of propagating an undefined value.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * `nan_mean` of a slice without finite entries is `None`.
//! * Correlation is within `[-1, 1]` or equals the policy sentinel.

// External dependencies
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Correlation Policy
// ============================================================================

/// Result policy for Pearson correlation when a series has zero variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ZeroVarianceCorrelationPolicy {
    /// Report `0.0`. Kept for compatibility with existing consumers.
    #[default]
    ReturnZero,

    /// Report NaN, the mathematically undefined value.
    ReturnNan,
}

impl ZeroVarianceCorrelationPolicy {
    /// Sentinel value for this policy.
    #[inline]
    pub fn sentinel<T: Float>(self) -> T {
        match self {
            Self::ReturnZero => T::zero(),
            Self::ReturnNan => T::nan(),
        }
    }
}

// ============================================================================
// Means
// ============================================================================

/// Mean of the finite entries of `values`.
#[inline]
pub fn nan_mean<T: Float>(values: impl IntoIterator<Item = T>) -> Option<T> {
    let (sum, count) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((T::zero(), 0usize), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        return None;
    }
    T::from(count).map(|n| sum / n)
}

// ============================================================================
// Pearson Correlation
// ============================================================================

/// Pearson correlation of `(a, b)` over pairs where both are finite.
///
/// Fewer than two usable pairs, or a constant series, resolve through
/// `policy`. A series is constant when its minimum equals its maximum.
pub fn pearson<T: Float>(a: &[T], b: &[T], policy: ZeroVarianceCorrelationPolicy) -> T {
    debug_assert_eq!(a.len(), b.len(), "Series must have same length");

    let pairs: Vec<(T, T)> = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();

    if pairs.len() < 2
        || is_constant(pairs.iter().map(|p| p.0))
        || is_constant(pairs.iter().map(|p| p.1))
    {
        return policy.sentinel();
    }

    let n = match T::from(pairs.len()) {
        Some(n) => n,
        None => return policy.sentinel(),
    };
    let (sum_a, sum_b) = pairs
        .iter()
        .fold((T::zero(), T::zero()), |(sa, sb), &(x, y)| (sa + x, sb + y));
    let mean_a = sum_a / n;
    let mean_b = sum_b / n;

    let (mut cov, mut var_a, mut var_b) = (T::zero(), T::zero(), T::zero());
    for &(x, y) in &pairs {
        let da = x - mean_a;
        let db = y - mean_b;
        cov = cov + da * db;
        var_a = var_a + da * da;
        var_b = var_b + db * db;
    }

    let denom = var_a.sqrt() * var_b.sqrt();
    if denom <= T::zero() || !denom.is_finite() {
        return policy.sentinel();
    }

    (cov / denom).max(-T::one()).min(T::one())
}

fn is_constant<T: Float>(mut values: impl Iterator<Item = T>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}
