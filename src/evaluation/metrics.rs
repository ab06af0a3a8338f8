//! Agreement metrics for collocated pairs.
//!
//! ## Purpose
//!
//! This module scores how well two sources agree once they have been
//! collocated: sample count, mean bias, root-mean-square error and Pearson
//! correlation.
//!
//! ## Design notes
//!
//! * **NaN skipping**: Non-finite differences are left out of bias and RMSE.
//! * **Defined zeros**: An empty match set, or one without any finite
//!   difference, reports zero bias and RMSE.
//! * **Guarded correlation**: Constant series follow
//!   [`ZeroVarianceCorrelationPolicy`], `ReturnZero` by default.
//!
//! ## Key concepts
//!
//! * **Bias**: `mean(b - a)`, positive when `B` reads high.
//! * **RMSE**: `sqrt(mean((b - a)^2))`.
//!
//! ## Invariants
//!
//! * `n` counts every match, finite or not.
//! * The metrics are a commutative reduction; match order does not matter.
//!
//! ## Non-goals
//!
//! * No confidence intervals or significance tests.

// Standard library
use std::fmt::{self, Display, Formatter};

// External dependencies
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::stats::{ZeroVarianceCorrelationPolicy, nan_mean, pearson};
use crate::primitives::matches::{Match, MatchSet};

/// Agreement statistics between the two sides of a match set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgreementMetrics<T = f64> {
    /// Number of matches.
    pub n: usize,

    /// Mean of `b - a`.
    pub bias: T,

    /// Root-mean-square of `b - a`.
    pub rmse: T,

    /// Pearson correlation of `a` and `b`.
    pub corr: T,
}

impl<T: Float> AgreementMetrics<T> {
    /// Metrics of an empty match set.
    pub fn zero() -> Self {
        Self {
            n: 0,
            bias: T::zero(),
            rmse: T::zero(),
            corr: T::zero(),
        }
    }

    /// Compute metrics from a slice of matches.
    pub fn compute(matches: &[Match<T>], policy: ZeroVarianceCorrelationPolicy) -> Self {
        let n = matches.len();
        if n == 0 {
            return Self::zero();
        }

        let diffs = matches.iter().map(|m| m.b_value - m.a_value);
        let bias = nan_mean(diffs.clone()).unwrap_or_else(T::zero);
        let rmse = nan_mean(diffs.map(|d| d * d))
            .map(|ms| ms.sqrt())
            .unwrap_or_else(T::zero);

        let a: Vec<T> = matches.iter().map(|m| m.a_value).collect();
        let b: Vec<T> = matches.iter().map(|m| m.b_value).collect();
        let corr = pearson(&a, &b, policy);

        Self { n, bias, rmse, corr }
    }
}

impl<T: Float> Display for AgreementMetrics<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let show = |v: T| v.to_f64().unwrap_or(f64::NAN);
        writeln!(f, "Agreement Metrics:")?;
        writeln!(f, "  Matches: {}", self.n)?;
        writeln!(f, "  Bias:    {:.6}", show(self.bias))?;
        writeln!(f, "  RMSE:    {:.6}", show(self.rmse))?;
        write!(f, "  Corr:    {:.6}", show(self.corr))
    }
}

/// Compute agreement metrics with the default correlation policy.
///
/// An empty set yields `{n: 0, bias: 0, rmse: 0, corr: 0}`.
pub fn compute_metrics<T: Float>(matches: &MatchSet<T>) -> AgreementMetrics<T> {
    AgreementMetrics::compute(matches.as_slice(), ZeroVarianceCorrelationPolicy::default())
}
