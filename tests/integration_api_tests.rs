use approx::assert_relative_eq;
use aqfusion::prelude::*;
use chrono::{DateTime, Duration, TimeZone, Utc};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Deterministic pseudo-random scatter (linear congruential).
fn scatter(n: usize, seed: u64) -> ObservationSet {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    (0..n)
        .map(|_| {
            let minutes = (next() * 240.0) as i64;
            Observation::new(
                t0() + Duration::minutes(minutes),
                40.0 + next() * 0.5,
                -74.0 + next() * 0.5,
                10.0 + next() * 30.0,
            )
        })
        .collect()
}

// ============================================================================
// Reference Scenarios
// ============================================================================

#[test]
fn test_reference_point_match() {
    let a: ObservationSet = vec![Observation::new(t0(), 0.0, 0.0, 5.0)].into();
    let b: ObservationSet = vec![Observation::new(t0(), 0.0, 0.001, 7.0)].into();

    let matches = collocate(&a, &b, 25.0, 60).unwrap();
    assert_eq!(matches.len(), 1);
    assert_relative_eq!(matches[0].distance_km, 0.111, epsilon = 1e-3);
    assert_eq!(matches[0].a_value, 5.0);
    assert_eq!(matches[0].b_value, 7.0);
}

#[test]
fn test_zero_minute_window_rejects_any_offset() {
    let a: ObservationSet = vec![Observation::new(t0(), 0.0, 0.0, 5.0)].into();
    let b: ObservationSet = vec![
        Observation::new(t0() + Duration::minutes(1), 0.0, 0.0, 7.0),
        Observation::new(t0() - Duration::minutes(3), 0.0, 0.0, 8.0),
    ]
    .into();

    assert!(collocate(&a, &b, 25.0, 0).unwrap().is_empty());
}

#[test]
fn test_missing_grid_variable_is_empty_not_error() {
    let a: ObservationSet = vec![Observation::new(t0(), 0.0, 0.0, 5.0)].into();
    let grid = GriddedField::new(vec![0.0], vec![0.0])
        .with_variable("pm25", vec![1.0])
        .unwrap();

    let matches = collocate_points_with_grid(&a, &grid, "no2", 25.0, 60).unwrap();
    assert!(matches.is_empty());
}

#[test]
fn test_constant_series_corr_zero() {
    let a: ObservationSet = (0..5)
        .map(|i| Observation::new(t0(), i as f64 * 0.01, 0.0, 3.0))
        .collect();
    let b: ObservationSet = (0..5)
        .map(|i| Observation::new(t0(), i as f64 * 0.01, 0.0, 3.0))
        .collect();

    let matches = collocate(&a, &b, 1.0, 0).unwrap();
    assert_eq!(matches.len(), 5);
    let metrics = compute_metrics(&matches);
    assert_eq!(metrics.corr, 0.0);
    assert!(!metrics.corr.is_nan());
}

// ============================================================================
// Builder Tests
// ============================================================================

#[test]
fn test_builder_defaults() {
    let collocator = Collocation::<f64>::new().build().unwrap();
    assert_eq!(collocator.window().max_km, DEFAULT_MAX_KM);
    assert_eq!(collocator.window().max_minutes, DEFAULT_MAX_MINUTES);
    assert_eq!(collocator.grid_variable(), "no2");
}

#[test]
fn test_builder_rejects_duplicates() {
    let err = Collocation::new()
        .max_km(10.0)
        .max_minutes(30)
        .max_km(5.0)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        FusionError::DuplicateParameter {
            parameter: "max_km"
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = Collocation::<f64>::new()
        .grid_variable("no2")
        .grid_variable("o3")
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("grid_variable"));
}

#[test]
fn test_builder_rejects_invalid_thresholds() {
    let err = Collocation::new().max_km(-3.0).build().unwrap_err();
    assert_eq!(err, FusionError::InvalidDistanceThreshold(-3.0));

    let err = Collocation::<f64>::new().max_minutes(-1).build().unwrap_err();
    assert_eq!(err, FusionError::InvalidTimeWindow(-1));
}

#[test]
fn test_builder_equals_free_function() {
    let a = scatter(60, 1);
    let b = scatter(80, 2);

    let collocator = Collocation::new().max_km(10.0).max_minutes(45).build().unwrap();
    let via_builder = collocator.collocate(&a, &b);
    let via_function = collocate(&a, &b, 10.0, 45).unwrap();

    assert_eq!(via_builder, via_function);
    assert!(!via_builder.is_empty());
}

#[test]
fn test_builder_grid_variable() {
    let points: ObservationSet = vec![Observation::new(t0(), 0.0, 0.0, 5.0)].into();
    let grid = GriddedField::new(vec![0.0], vec![0.0])
        .with_variable("no2", vec![1.0])
        .unwrap()
        .with_variable("o3", vec![2.0])
        .unwrap();

    let default = Collocation::new().build().unwrap();
    assert_eq!(default.collocate_with_grid(&points, &grid)[0].b_value, 1.0);

    let ozone = Collocation::new().grid_variable("o3").build().unwrap();
    assert_eq!(ozone.collocate_with_grid(&points, &grid)[0].b_value, 2.0);
    assert_eq!(
        ozone.collocate_with_grid_var(&points, &grid, "no2")[0].b_value,
        1.0
    );
    assert!(
        ozone
            .collocate_with_grid_var(&points, &grid, "pm25")
            .is_empty()
    );
}

// ============================================================================
// Execution Tests
// ============================================================================

#[test]
fn test_parallel_matches_sequential() {
    let a = scatter(300, 11);
    let b = scatter(400, 12);

    let sequential = Collocation::new().max_km(5.0).build().unwrap();
    let parallel = Collocation::new().max_km(5.0).parallel(true).build().unwrap();

    assert_eq!(sequential.collocate(&a, &b), parallel.collocate(&a, &b));

    let lat: Vec<f64> = (0..=10).map(|i| 40.0 + i as f64 * 0.05).collect();
    let lon: Vec<f64> = (0..=10).map(|i| -74.0 + i as f64 * 0.05).collect();
    let data: Vec<f64> = (0..lat.len() * lon.len()).map(|v| v as f64).collect();
    let grid = GriddedField::new(lat, lon)
        .with_variable("no2", data)
        .unwrap();

    assert_eq!(
        sequential.collocate_with_grid(&a, &grid),
        parallel.collocate_with_grid(&a, &grid)
    );
}

#[test]
fn test_end_to_end_sensor_validation() {
    let reference = scatter(100, 21);

    // Sensors read 2 units high, 10 minutes late, about 50 metres away
    let sensors: ObservationSet = reference
        .iter()
        .map(|o| {
            Observation::new(
                o.time + Duration::minutes(10),
                o.lat + 0.0005,
                o.lon,
                o.value + 2.0,
            )
        })
        .collect();

    let collocator = Collocation::new().max_km(1.0).max_minutes(15).build().unwrap();
    let matches = collocator.collocate(&reference, &sensors);
    assert_eq!(matches.len(), reference.len());

    let metrics = collocator.metrics(&matches);
    assert_eq!(metrics.n, 100);
    assert_relative_eq!(metrics.bias, 2.0, epsilon = 1e-9);
    assert_relative_eq!(metrics.rmse, 2.0, epsilon = 1e-9);
    assert_relative_eq!(metrics.corr, 1.0, epsilon = 1e-9);
    assert!(matches.iter().all(|m| m.distance_km < 0.06));

    let csv = matches.to_csv();
    assert_eq!(csv.lines().count(), 101);
}
