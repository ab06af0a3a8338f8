use aqfusion::prelude::*;
use std::collections::{BTreeMap, HashMap};

fn units(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// Sub-index Tests
// ============================================================================

#[test]
fn test_pm25_breakpoints() {
    assert_eq!(aqi_pm25(0.0), 0.0);
    assert_eq!(aqi_pm25(12.0), 50.0);
    assert_eq!(aqi_pm25(12.1), 51.0);
    assert_eq!(aqi_pm25(35.4), 100.0);
    assert_eq!(aqi_pm25(35.5), 101.0);
    assert_eq!(aqi_pm25(40.0), 112.0);
    assert_eq!(aqi_pm25(500.4), 500.0);
}

#[test]
fn test_pm25_gap_uses_upper_interval() {
    // 12.05 lies between 12.0 and 12.1
    assert_eq!(aqi_pm25(12.05), 51.0);
}

#[test]
fn test_pm10_breakpoints() {
    assert_eq!(aqi_pm10(54.0), 50.0);
    assert_eq!(aqi_pm10(55.0), 51.0);
    assert_eq!(aqi_pm10(100.0), 73.0);
    assert_eq!(aqi_pm10(604.0), 500.0);
}

#[test]
fn test_o3_8h_breakpoints() {
    assert_eq!(aqi_o3_8h(0.054), 50.0);
    assert_eq!(aqi_o3_8h(0.060), 67.0);
    assert_eq!(aqi_o3_8h(0.070), 100.0);
    assert_eq!(aqi_o3_8h(0.200), 300.0);
}

#[test]
fn test_no2_1h_breakpoints() {
    assert_eq!(aqi_no2_1h(10.0), 9.0);
    assert_eq!(aqi_no2_1h(53.0), 50.0);
    assert_eq!(aqi_no2_1h(100.0), 100.0);
    assert_eq!(aqi_no2_1h(360.0), 150.0);
    assert_eq!(aqi_no2_1h(2049.0), 500.0);
}

#[test]
fn test_above_every_table_is_ceiling() {
    assert_eq!(aqi_pm25(1000.0), 500.0);
    assert_eq!(aqi_pm10(10_000.0), 500.0);
    assert_eq!(aqi_o3_8h(0.25), 500.0);
    assert_eq!(aqi_no2_1h(5000.0), 500.0);
    assert_eq!(aqi_pm25(f64::INFINITY), 500.0);
}

#[test]
fn test_negative_concentration_clamped_to_zero() {
    assert_eq!(aqi_pm25(-5.0), 0.0);
    assert_eq!(aqi_no2_1h(-0.1), 0.0);
}

#[test]
fn test_tabulated_bounds_map_to_their_index() {
    for pollutant in Pollutant::ALL {
        let mut prev = -1.0;
        for bp in pollutant.table().rows() {
            let lo = pollutant.sub_index(bp.c_lo);
            let hi = pollutant.sub_index(bp.c_hi);
            assert_eq!(lo, bp.aqi_lo, "{} at {}", pollutant, bp.c_lo);
            assert_eq!(hi, bp.aqi_hi, "{} at {}", pollutant, bp.c_hi);
            assert!(lo > prev);
            prev = hi;
        }
    }
}

#[test]
fn test_boundary_discontinuity_preserved() {
    assert_eq!(aqi_no2_1h(53.0), 50.0);
    assert_eq!(aqi_no2_1h(54.0), 51.0);
    assert_eq!(aqi_pm25(600.0), 500.0);
}

// ============================================================================
// Breakpoint Table Tests
// ============================================================================

#[test]
fn test_custom_table_rounds_half_to_even() {
    let table = BreakpointTable::new(vec![
        Breakpoint::new(0.0, 10.0, 0.0, 10.0),
        Breakpoint::new(10.5, 20.0, 11.0, 20.0),
    ])
    .unwrap();

    assert_eq!(table.index(2.5), 2.0);
    assert_eq!(table.index(3.5), 4.0);
    assert_eq!(table.index(25.0), 500.0);
    assert_eq!(table.rows().len(), 2);
}

#[test]
fn test_malformed_tables_rejected() {
    let cases = vec![
        vec![],
        vec![Breakpoint::new(5.0, 1.0, 0.0, 50.0)],
        vec![Breakpoint::new(0.0, 1.0, 50.0, 0.0)],
        vec![Breakpoint::new(0.0, f64::NAN, 0.0, 50.0)],
        vec![
            Breakpoint::new(0.0, 10.0, 0.0, 50.0),
            Breakpoint::new(5.0, 10.0, 51.0, 100.0),
        ],
    ];

    for rows in cases {
        let err = BreakpointTable::new(rows).unwrap_err();
        assert!(matches!(err, FusionError::InvalidBreakpoints(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}

#[test]
fn test_degenerate_interval_scales_to_upper_index() {
    let table = BreakpointTable::new(vec![Breakpoint::new(1.0, 1.0, 40.0, 60.0)]).unwrap();
    assert_eq!(table.index(0.5), 60.0);
}

// ============================================================================
// Category Tests
// ============================================================================

#[test]
fn test_category_boundaries_inclusive() {
    use AqiCategory::*;
    let cases = [
        (0.0, Good),
        (50.0, Good),
        (50.5, Moderate),
        (51.0, Moderate),
        (100.0, Moderate),
        (101.0, UnhealthySensitive),
        (150.0, UnhealthySensitive),
        (151.0, Unhealthy),
        (200.0, Unhealthy),
        (201.0, VeryUnhealthy),
        (300.0, VeryUnhealthy),
        (301.0, Hazardous),
        (500.0, Hazardous),
    ];
    for (aqi, expected) in cases {
        assert_eq!(AqiCategory::from_index(aqi), expected, "aqi = {}", aqi);
    }
}

#[test]
fn test_category_labels() {
    assert_eq!(AqiCategory::Good.to_string(), "Good");
    assert_eq!(
        AqiCategory::UnhealthySensitive.to_string(),
        "Unhealthy for Sensitive Groups"
    );
    assert_eq!(AqiCategory::VeryUnhealthy.label(), "Very Unhealthy");
    assert_eq!(AqiCategory::Unknown.label(), "Unknown");
}

// ============================================================================
// Composite Tests
// ============================================================================

#[test]
fn test_composite_picks_dominant() {
    let result = compute_composite([("pm25", 40.0_f64), ("no2", 10.0)], None);
    assert_eq!(result.value, 112.0);
    assert_eq!(result.category, AqiCategory::UnhealthySensitive);
    assert_eq!(result.dominant_pollutant, "pm25");
    assert_eq!(
        result.to_string(),
        "AQI: 112 (Unhealthy for Sensitive Groups), dominant pollutant: pm25"
    );
}

#[test]
fn test_composite_ties_follow_fixed_order() {
    // Both sub-indices are 50; pm25 precedes no2 regardless of input order
    let result = compute_composite([("no2", 53.0_f64), ("pm25", 12.0)], None);
    assert_eq!(result.value, 50.0);
    assert_eq!(result.dominant_pollutant, "pm25");

    let result = compute_composite([("o3", 0.054_f64), ("pm10", 54.0)], None);
    assert_eq!(result.dominant_pollutant, "pm10");
}

#[test]
fn test_composite_without_recognised_pollutant() {
    let result = compute_composite([("co", 4.0_f64)], None);
    assert_eq!(result, AqiResult::unknown());
    assert_eq!(result.value, 0.0);
    assert_eq!(result.category, AqiCategory::Unknown);
    assert_eq!(result.dominant_pollutant, "");

    let empty: [(&str, f64); 0] = [];
    assert_eq!(compute_composite(empty, None), AqiResult::unknown());
}

#[test]
fn test_composite_nan_reading_clamps_to_zero() {
    // A present key with a NaN reading scores like aqi_pm25(NaN)
    assert_eq!(aqi_pm25(f64::NAN), 0.0);
    let result = compute_composite([("pm25", f64::NAN)], None);
    assert_eq!(result.value, 0.0);
    assert_eq!(result.category, AqiCategory::Good);
    assert_eq!(result.dominant_pollutant, "pm25");

    let result = compute_composite([("pm25", f64::NAN), ("no2", 10.0)], None);
    assert_eq!(result.value, 9.0);
    assert_eq!(result.dominant_pollutant, "no2");

    let subs = sub_indices([("o3", f64::NAN)], None);
    assert_eq!(subs, vec![(Pollutant::O3, 0.0)]);
}

#[test]
fn test_composite_accepts_hash_map() {
    let mut readings = HashMap::new();
    readings.insert("pm10".to_string(), 100.0);
    readings.insert("o3".to_string(), 0.070);

    let result = compute_composite(&readings, None);
    assert_eq!(result.value, 100.0);
    assert_eq!(result.dominant_pollutant, "o3");
}

#[test]
fn test_composite_unit_overrides() {
    // 60 ppb ozone is 0.060 ppm
    let overrides = units(&[("o3", "ppb"), ("no2", "ppm")]);
    let result = compute_composite([("o3", 60.0_f64)], Some(&overrides));
    assert_eq!(result.value, 67.0);

    // 0.1 ppm NO2 is 100 ppb
    let result = compute_composite([("no2", 0.1_f64)], Some(&overrides));
    assert_eq!(result.value, 100.0);

    let overrides = units(&[("pm25", "mg/m³")]);
    let result = compute_composite([("pm25", 0.04_f64)], Some(&overrides));
    assert_eq!(result.value, 112.0);
}

#[test]
fn test_composite_unsupported_unit_used_as_given() {
    let overrides = units(&[("pm25", "ppm"), ("no2", "furlongs")]);
    let result = compute_composite([("pm25", 40.0_f64), ("no2", 10.0)], Some(&overrides));
    assert_eq!(result.value, 112.0);
    assert_eq!(result.dominant_pollutant, "pm25");
}

#[test]
fn test_sub_indices_in_tie_break_order() {
    let subs = sub_indices([("no2", 10.0_f64), ("pm25", 40.0), ("o3", 0.06)], None);
    assert_eq!(
        subs,
        vec![
            (Pollutant::Pm25, 112.0),
            (Pollutant::O3, 67.0),
            (Pollutant::No2, 9.0),
        ]
    );
}

// ============================================================================
// Pollutant and Unit Tests
// ============================================================================

#[test]
fn test_pollutant_keys() {
    for p in Pollutant::ALL {
        assert_eq!(Pollutant::from_key(p.key()), Some(p));
    }
    assert_eq!(Pollutant::from_key("PM25"), None);
    assert_eq!(Pollutant::No2.to_string(), "no2");
    assert_eq!(Pollutant::O3.native_unit(), ConcentrationUnit::Ppm);
    assert_eq!(
        Pollutant::Pm10.native_unit(),
        ConcentrationUnit::MicrogramsPerCubicMeter
    );
}

#[test]
fn test_concentration_unit_parse() {
    use ConcentrationUnit::*;
    assert_eq!(ConcentrationUnit::parse("ppm"), Some(Ppm));
    assert_eq!(ConcentrationUnit::parse(" PPB "), Some(Ppb));
    assert_eq!(
        ConcentrationUnit::parse("µg/m³"),
        Some(MicrogramsPerCubicMeter)
    );
    assert_eq!(
        ConcentrationUnit::parse("ug/m^3"),
        Some(MicrogramsPerCubicMeter)
    );
    assert_eq!(
        ConcentrationUnit::parse("mg m-3"),
        Some(MilligramsPerCubicMeter)
    );
    assert_eq!(ConcentrationUnit::parse("furlongs"), None);
}

#[test]
fn test_concentration_unit_factors() {
    use ConcentrationUnit::*;
    assert_eq!(Ppm.factor_to(Ppb), Some(1000.0));
    assert_eq!(Ppb.factor_to(Ppm), Some(0.001));
    assert_eq!(Ppb.factor_to(Ppb), Some(1.0));
    assert_eq!(MilligramsPerCubicMeter.factor_to(MicrogramsPerCubicMeter), Some(1000.0));
    assert_eq!(Ppm.factor_to(MicrogramsPerCubicMeter), None);
}
