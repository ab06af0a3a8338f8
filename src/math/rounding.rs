//! Rounding helpers.
//!
//! Index values are reported as whole numbers using round-half-to-even.

// External dependencies
use num_traits::Float;

/// Round to the nearest integer, resolving exact halves to the even neighbour.
#[inline]
pub fn round_half_even<T: Float>(x: T) -> T {
    let rounded = x.round();
    let half = T::from(0.5).unwrap_or_else(T::nan);
    if (x - x.trunc()).abs() != half {
        return rounded;
    }
    // Exact tie: `round` went away from zero; step back if that landed on odd.
    let two = T::one() + T::one();
    if (rounded / two).fract() == T::zero() {
        rounded
    } else {
        rounded - x.signum()
    }
}
