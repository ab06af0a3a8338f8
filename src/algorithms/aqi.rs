//! Air-quality index computation from pollutant concentrations.
//!
//! ## Purpose
//!
//! This module converts raw pollutant concentrations into EPA-style AQI
//! sub-indices through piecewise-linear breakpoint tables, and combines
//! sub-indices into a composite index attributed to its dominant pollutant.
//!
//! ## Design notes
//!
//! * **Tables**: Each [`Pollutant`] owns one static [`BreakpointTable`];
//!   custom tables are validated on construction.
//! * **Lookup**: Binary search for the first interval whose upper bound
//!   covers the concentration.
//! * **Rounding**: Sub-indices are rounded half-to-even.
//! * **Ceiling**: Concentrations above every table bound map to 500.
//!
//! ## Key concepts
//!
//! * **Linear scale**:
//!   ```text
//!   I = (I_hi - I_lo) / (C_hi - C_lo) * (C - C_lo) + I_lo
//!   ```
//! * **Gaps**: Tables are tabulated at reporting precision, so a
//!   concentration falling between two intervals uses the upper interval
//!   (e.g. PM2.5 at 12.05 µg/m³ rounds to 51).
//!
//! ## Invariants
//!
//! * Negative concentrations are clamped to zero.
//! * Composite ties resolve in `pm25, pm10, o3, no2` order.
//!
//! ## Non-goals
//!
//! * No averaging-period handling (callers supply 24-h, 8-h or 1-h means).
//! * No NowCast.

// Standard library
use std::borrow::{Borrow, Cow};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

// External dependencies
use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::rounding::round_half_even;
use crate::primitives::errors::FusionError;

/// Index value reported for concentrations beyond every table.
pub const AQI_CEILING: f64 = 500.0;

// ============================================================================
// Breakpoints
// ============================================================================

/// One row of a breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Breakpoint {
    /// Lower concentration bound.
    pub c_lo: f64,
    /// Upper concentration bound (inclusive).
    pub c_hi: f64,
    /// Index at `c_lo`.
    pub aqi_lo: f64,
    /// Index at `c_hi`.
    pub aqi_hi: f64,
}

impl Breakpoint {
    /// Create a breakpoint row.
    pub const fn new(c_lo: f64, c_hi: f64, aqi_lo: f64, aqi_hi: f64) -> Self {
        Self {
            c_lo,
            c_hi,
            aqi_lo,
            aqi_hi,
        }
    }

    /// Linear interpolation of `c` within this row (unrounded).
    #[inline]
    pub fn scale(&self, c: f64) -> f64 {
        scale(c, self.c_lo, self.c_hi, self.aqi_lo, self.aqi_hi)
    }
}

/// EPA linear interpolation between breakpoints.
///
/// A degenerate interval (`bp_hi == bp_lo`) yields `aqi_hi`.
#[inline]
pub fn scale(c: f64, bp_lo: f64, bp_hi: f64, aqi_lo: f64, aqi_hi: f64) -> f64 {
    if bp_hi == bp_lo {
        return aqi_hi;
    }
    (aqi_hi - aqi_lo) / (bp_hi - bp_lo) * (c - bp_lo) + aqi_lo
}

/// Ordered breakpoint table for one pollutant.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    rows: Cow<'static, [Breakpoint]>,
}

impl BreakpointTable {
    const fn builtin(rows: &'static [Breakpoint]) -> Self {
        Self {
            rows: Cow::Borrowed(rows),
        }
    }

    /// Validate and wrap a caller-supplied table.
    ///
    /// Rows must be finite, non-empty, have `c_lo <= c_hi` and
    /// `aqi_lo <= aqi_hi`, and strictly ascending upper bounds.
    pub fn new(rows: Vec<Breakpoint>) -> Result<Self, FusionError> {
        if rows.is_empty() {
            return Err(FusionError::InvalidBreakpoints("table is empty".into()));
        }

        for (i, bp) in rows.iter().enumerate() {
            let finite = [bp.c_lo, bp.c_hi, bp.aqi_lo, bp.aqi_hi]
                .iter()
                .all(|v| v.is_finite());
            if !finite {
                return Err(FusionError::InvalidBreakpoints(format!(
                    "row {} has a non-finite bound",
                    i
                )));
            }
            if bp.c_lo > bp.c_hi {
                return Err(FusionError::InvalidBreakpoints(format!(
                    "row {}: concentration range {}..{} is reversed",
                    i, bp.c_lo, bp.c_hi
                )));
            }
            if bp.aqi_lo > bp.aqi_hi {
                return Err(FusionError::InvalidBreakpoints(format!(
                    "row {}: index range {}..{} is reversed",
                    i, bp.aqi_lo, bp.aqi_hi
                )));
            }
        }

        if let Some(i) = rows.windows(2).position(|w| w[1].c_hi <= w[0].c_hi) {
            return Err(FusionError::InvalidBreakpoints(format!(
                "upper bounds not strictly ascending at row {}",
                i + 1
            )));
        }

        Ok(Self {
            rows: Cow::Owned(rows),
        })
    }

    /// Table rows in ascending order.
    #[inline]
    pub fn rows(&self) -> &[Breakpoint] {
        &self.rows
    }

    /// First row whose upper bound covers `c`.
    #[inline]
    pub fn interval_for(&self, c: f64) -> Option<&Breakpoint> {
        let idx = self.rows.partition_point(|bp| bp.c_hi < c);
        self.rows.get(idx)
    }

    /// Rounded sub-index for concentration `c` in the table's unit.
    pub fn index(&self, c: f64) -> f64 {
        let c = c.max(0.0);
        match self.interval_for(c) {
            Some(bp) => round_half_even(bp.scale(c)),
            None => AQI_CEILING,
        }
    }
}

const PM25_ROWS: [Breakpoint; 7] = [
    Breakpoint::new(0.0, 12.0, 0.0, 50.0),
    Breakpoint::new(12.1, 35.4, 51.0, 100.0),
    Breakpoint::new(35.5, 55.4, 101.0, 150.0),
    Breakpoint::new(55.5, 150.4, 151.0, 200.0),
    Breakpoint::new(150.5, 250.4, 201.0, 300.0),
    Breakpoint::new(250.5, 350.4, 301.0, 400.0),
    Breakpoint::new(350.5, 500.4, 401.0, 500.0),
];

const PM10_ROWS: [Breakpoint; 7] = [
    Breakpoint::new(0.0, 54.0, 0.0, 50.0),
    Breakpoint::new(55.0, 154.0, 51.0, 100.0),
    Breakpoint::new(155.0, 254.0, 101.0, 150.0),
    Breakpoint::new(255.0, 354.0, 151.0, 200.0),
    Breakpoint::new(355.0, 424.0, 201.0, 300.0),
    Breakpoint::new(425.0, 504.0, 301.0, 400.0),
    Breakpoint::new(505.0, 604.0, 401.0, 500.0),
];

const O3_8H_ROWS: [Breakpoint; 5] = [
    Breakpoint::new(0.000, 0.054, 0.0, 50.0),
    Breakpoint::new(0.055, 0.070, 51.0, 100.0),
    Breakpoint::new(0.071, 0.085, 101.0, 150.0),
    Breakpoint::new(0.086, 0.105, 151.0, 200.0),
    Breakpoint::new(0.106, 0.200, 201.0, 300.0),
];

const NO2_1H_ROWS: [Breakpoint; 7] = [
    Breakpoint::new(0.0, 53.0, 0.0, 50.0),
    Breakpoint::new(54.0, 100.0, 51.0, 100.0),
    Breakpoint::new(101.0, 360.0, 101.0, 150.0),
    Breakpoint::new(361.0, 649.0, 151.0, 200.0),
    Breakpoint::new(650.0, 1249.0, 201.0, 300.0),
    Breakpoint::new(1250.0, 1649.0, 301.0, 400.0),
    Breakpoint::new(1650.0, 2049.0, 401.0, 500.0),
];

/// PM2.5 24-hour table, µg/m³.
pub static PM25_TABLE: BreakpointTable = BreakpointTable::builtin(&PM25_ROWS);

/// PM10 24-hour table, µg/m³.
pub static PM10_TABLE: BreakpointTable = BreakpointTable::builtin(&PM10_ROWS);

/// O3 8-hour table, ppm.
pub static O3_8H_TABLE: BreakpointTable = BreakpointTable::builtin(&O3_8H_ROWS);

/// NO2 1-hour table, ppb.
pub static NO2_1H_TABLE: BreakpointTable = BreakpointTable::builtin(&NO2_1H_ROWS);

// ============================================================================
// Units
// ============================================================================

/// Concentration unit accepted in unit overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConcentrationUnit {
    /// Parts per million by volume.
    Ppm,
    /// Parts per billion by volume.
    Ppb,
    /// Micrograms per cubic metre.
    MicrogramsPerCubicMeter,
    /// Milligrams per cubic metre.
    MilligramsPerCubicMeter,
}

impl ConcentrationUnit {
    /// Parse a unit label, case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '^')
            .map(|c| match c {
                'µ' | 'μ' => 'u',
                '³' => '3',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "ppm" => Some(Self::Ppm),
            "ppb" => Some(Self::Ppb),
            "ug/m3" | "ugm-3" => Some(Self::MicrogramsPerCubicMeter),
            "mg/m3" | "mgm-3" => Some(Self::MilligramsPerCubicMeter),
            _ => None,
        }
    }

    /// Multiplicative factor converting from `self` to `target`.
    ///
    /// `None` when converting between mixing ratio and mass concentration,
    /// which would need temperature, pressure and molar mass.
    pub fn factor_to(self, target: Self) -> Option<f64> {
        use ConcentrationUnit::*;
        match (self, target) {
            (a, b) if a == b => Some(1.0),
            (Ppm, Ppb) => Some(1000.0),
            (Ppb, Ppm) => Some(0.001),
            (MilligramsPerCubicMeter, MicrogramsPerCubicMeter) => Some(1000.0),
            (MicrogramsPerCubicMeter, MilligramsPerCubicMeter) => Some(0.001),
            _ => None,
        }
    }
}

// ============================================================================
// Pollutants
// ============================================================================

/// Pollutants with a built-in breakpoint table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pollutant {
    /// Fine particulate matter, 24-hour mean.
    Pm25,
    /// Coarse particulate matter, 24-hour mean.
    Pm10,
    /// Ozone, 8-hour mean.
    O3,
    /// Nitrogen dioxide, 1-hour mean.
    No2,
}

impl Pollutant {
    /// All pollutants in composite tie-break order.
    pub const ALL: [Pollutant; 4] = [Pollutant::Pm25, Pollutant::Pm10, Pollutant::O3, Pollutant::No2];

    /// Map key used in concentration maps.
    pub fn key(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::O3 => "o3",
            Pollutant::No2 => "no2",
        }
    }

    /// Parse a map key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Breakpoint table for this pollutant.
    pub fn table(self) -> &'static BreakpointTable {
        match self {
            Pollutant::Pm25 => &PM25_TABLE,
            Pollutant::Pm10 => &PM10_TABLE,
            Pollutant::O3 => &O3_8H_TABLE,
            Pollutant::No2 => &NO2_1H_TABLE,
        }
    }

    /// Unit the table is tabulated in.
    pub fn native_unit(self) -> ConcentrationUnit {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => ConcentrationUnit::MicrogramsPerCubicMeter,
            Pollutant::O3 => ConcentrationUnit::Ppm,
            Pollutant::No2 => ConcentrationUnit::Ppb,
        }
    }

    /// Sub-index for a concentration in the native unit.
    #[inline]
    pub fn sub_index(self, concentration: f64) -> f64 {
        self.table().index(concentration)
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

impl Display for Pollutant {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// PM2.5 sub-index (24-hour mean, µg/m³).
pub fn aqi_pm25(ug_m3: f64) -> f64 {
    PM25_TABLE.index(ug_m3)
}

/// PM10 sub-index (24-hour mean, µg/m³).
pub fn aqi_pm10(ug_m3: f64) -> f64 {
    PM10_TABLE.index(ug_m3)
}

/// O3 sub-index (8-hour mean, ppm).
pub fn aqi_o3_8h(ppm: f64) -> f64 {
    O3_8H_TABLE.index(ppm)
}

/// NO2 sub-index (1-hour mean, ppb).
pub fn aqi_no2_1h(ppb: f64) -> f64 {
    NO2_1H_TABLE.index(ppb)
}

// ============================================================================
// Categories and Results
// ============================================================================

/// Health category of an index value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AqiCategory {
    /// 0–50.
    Good,
    /// 51–100.
    Moderate,
    /// 101–150.
    UnhealthySensitive,
    /// 151–200.
    Unhealthy,
    /// 201–300.
    VeryUnhealthy,
    /// Above 300.
    Hazardous,
    /// No pollutant could be evaluated.
    Unknown,
}

impl AqiCategory {
    /// Category for an index value (inclusive upper bounds).
    pub fn from_index(aqi: f64) -> Self {
        if aqi <= 50.0 {
            Self::Good
        } else if aqi <= 100.0 {
            Self::Moderate
        } else if aqi <= 150.0 {
            Self::UnhealthySensitive
        } else if aqi <= 200.0 {
            Self::Unhealthy
        } else if aqi <= 300.0 {
            Self::VeryUnhealthy
        } else {
            Self::Hazardous
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            Self::Unhealthy => "Unhealthy",
            Self::VeryUnhealthy => "Very Unhealthy",
            Self::Hazardous => "Hazardous",
            Self::Unknown => "Unknown",
        }
    }
}

impl Display for AqiCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Composite index with its category and dominant pollutant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AqiResult {
    /// Composite index (maximum sub-index).
    pub value: f64,

    /// Category of `value`.
    pub category: AqiCategory,

    /// Key of the pollutant that set `value`; empty when none was evaluated.
    pub dominant_pollutant: String,
}

impl AqiResult {
    /// Result reported when no recognised pollutant is present.
    pub fn unknown() -> Self {
        Self {
            value: 0.0,
            category: AqiCategory::Unknown,
            dominant_pollutant: String::new(),
        }
    }
}

impl Display for AqiResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.category == AqiCategory::Unknown {
            return write!(f, "AQI: unknown (no recognised pollutant)");
        }
        write!(
            f,
            "AQI: {:.0} ({}), dominant pollutant: {}",
            self.value, self.category, self.dominant_pollutant
        )
    }
}

// ============================================================================
// Composite Index
// ============================================================================

/// Sub-index of every recognised pollutant, in tie-break order.
///
/// Unrecognised keys are ignored and a repeated key keeps its last value.
/// A NaN reading clamps to a sub-index of 0.
/// `units` optionally maps pollutant keys to the unit of the supplied value.
pub fn sub_indices<I, K, V>(
    pollutants: I,
    units: Option<&BTreeMap<String, String>>,
) -> Vec<(Pollutant, f64)>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Borrow<f64>,
{
    let mut readings = [None; Pollutant::ALL.len()];
    for (key, value) in pollutants {
        let c = *value.borrow();
        if let Some(p) = Pollutant::from_key(key.as_ref()) {
            readings[p.ordinal()] = Some(c);
        }
    }

    Pollutant::ALL
        .into_iter()
        .filter_map(|p| {
            readings[p.ordinal()].map(|c| (p, p.sub_index(to_native(p, c, units))))
        })
        .collect()
}

/// Composite AQI of a concentration map.
///
/// Keys are `pm25`, `pm10` (µg/m³), `o3` (ppm, 8-hour) and `no2`
/// (ppb, 1-hour) unless `units` overrides the unit for a key. The composite
/// is the largest sub-index; without any recognised key the result is
/// [`AqiResult::unknown`].
pub fn compute_composite<I, K, V>(pollutants: I, units: Option<&BTreeMap<String, String>>) -> AqiResult
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Borrow<f64>,
{
    let mut dominant: Option<(Pollutant, f64)> = None;
    for (p, idx) in sub_indices(pollutants, units) {
        if dominant.is_none_or(|(_, best)| idx > best) {
            dominant = Some((p, idx));
        }
    }

    match dominant {
        Some((p, value)) => AqiResult {
            value,
            category: AqiCategory::from_index(value),
            dominant_pollutant: p.key().to_owned(),
        },
        None => AqiResult::unknown(),
    }
}

fn to_native(p: Pollutant, c: f64, units: Option<&BTreeMap<String, String>>) -> f64 {
    let Some(label) = units.and_then(|u| u.get(p.key())) else {
        return c;
    };

    let factor = ConcentrationUnit::parse(label).and_then(|u| u.factor_to(p.native_unit()));
    match factor {
        Some(factor) => c * factor,
        None => {
            warn!(pollutant = p.key(), unit = %label, "ignoring unsupported unit override");
            c
        }
    }
}
