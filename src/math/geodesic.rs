//! Great-circle distance on a spherical Earth.
//!
//! ## Purpose
//!
//! This module provides the haversine distance used by both collocation
//! matchers to decide whether two positions are close enough to pair.
//!
//! ## Design notes
//!
//! * **Spherical model**: Mean Earth radius of 6371.0 km; no ellipsoid.
//! * **Clamping**: The haversine term is clamped to `[0, 1]` so rounding near
//!   antipodes cannot produce NaN.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Distance is non-negative for finite inputs.
//! * `haversine(p, p) == 0` and `haversine(a, b) == haversine(b, a)`.
//!
//! ## Non-goals
//!
//! * This module does not validate coordinate ranges.
//! * This module does not provide a spatial index (brute force is intended).

// External dependencies
use num_traits::Float;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// ============================================================================
// Haversine
// ============================================================================

/// Great-circle distance in kilometres between two `(lat, lon)` pairs given
/// in degrees.
///
/// # Formula
///
/// ```text
/// a = sin²(Δφ/2) + cos φ₁ · cos φ₂ · sin²(Δλ/2)
/// d = 2R · atan2(√a, √(1 − a))
/// ```
#[inline]
pub fn haversine<T: Float>(lat1: T, lon1: T, lat2: T, lon2: T) -> T {
    let half = T::from(0.5).unwrap_or_else(T::nan);
    let two = T::one() + T::one();
    let radius = T::from(EARTH_RADIUS_KM).unwrap_or_else(T::nan);

    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let s_lat = (dlat * half).sin();
    let s_lon = (dlon * half).sin();
    let a = s_lat * s_lat + lat1.to_radians().cos() * lat2.to_radians().cos() * s_lon * s_lon;
    let a = a.max(T::zero()).min(T::one());

    let c = two * a.sqrt().atan2((T::one() - a).sqrt());
    radius * c
}

/// Distances from one point to every point of a coordinate array.
///
/// `lats` and `lons` must have the same length; the shorter one bounds the
/// output.
pub fn haversine_many<T: Float>(lat: T, lon: T, lats: &[T], lons: &[T]) -> Vec<T> {
    debug_assert_eq!(lats.len(), lons.len(), "Coordinate arrays must match");
    lats.iter()
        .zip(lons.iter())
        .map(|(&la, &lo)| haversine(lat, lon, la, lo))
        .collect()
}
