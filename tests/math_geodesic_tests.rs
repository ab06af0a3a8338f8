#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use aqfusion::internals::math::geodesic::{EARTH_RADIUS_KM, haversine, haversine_many};
use std::f64::consts::PI;

// ============================================================================
// Haversine Tests
// ============================================================================

#[test]
fn test_haversine_same_point_is_zero() {
    assert_eq!(haversine(40.7128, -74.0060, 40.7128, -74.0060), 0.0);
    assert_eq!(haversine(-89.9, 179.9, -89.9, 179.9), 0.0);
}

#[test]
fn test_haversine_one_degree_of_latitude() {
    // 2πR / 360
    let d: f64 = haversine(0.0, 0.0, 1.0, 0.0);
    assert_relative_eq!(d, 2.0 * PI * EARTH_RADIUS_KM / 360.0, epsilon = 1e-9);
}

#[test]
fn test_haversine_known_city_pairs() {
    // New York to Los Angeles
    let d = haversine(40.7128, -74.0060, 34.0522, -118.2437);
    assert_relative_eq!(d, 3935.7, epsilon = 1.0);

    // London to Paris
    let d = haversine(51.5074, -0.1278, 48.8566, 2.3522);
    assert_relative_eq!(d, 343.5, epsilon = 1.0);
}

#[test]
fn test_haversine_symmetry() {
    let d1 = haversine(12.3, 45.6, -7.8, 101.2);
    let d2 = haversine(-7.8, 101.2, 12.3, 45.6);
    assert_relative_eq!(d1, d2, epsilon = 1e-9);
}

#[test]
fn test_haversine_antipodes_finite() {
    let d: f64 = haversine(0.0, 0.0, 0.0, 180.0);
    assert!(d.is_finite());
    assert_relative_eq!(d, PI * EARTH_RADIUS_KM, epsilon = 1e-6);
}

#[test]
fn test_haversine_f32() {
    let d = haversine(0.0f32, 0.0, 1.0, 0.0);
    assert_relative_eq!(d, 111.19493f32, epsilon = 1e-2);
}

#[test]
fn test_haversine_many() {
    let lats = [0.0_f64, 1.0, 0.0];
    let lons = [0.0_f64, 0.0, 1.0];
    let d = haversine_many(0.0, 0.0, &lats, &lons);
    assert_eq!(d.len(), 3);
    assert_eq!(d[0], 0.0);
    assert_relative_eq!(d[1], d[2], epsilon = 1e-9);
}
