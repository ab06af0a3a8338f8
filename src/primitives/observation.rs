//! Point observation records and columnar collections.
//!
//! ## Purpose
//!
//! This module defines [`Observation`], a single timestamped point
//! measurement, and [`ObservationSet`], an insertion-ordered columnar
//! collection of them as supplied by a storage layer.
//!
//! ## Design notes
//!
//! * **Columnar**: The set stores one vector per field, mirroring how
//!   upstream readers materialise arrays.
//! * **Typed absence**: A collection read without coordinate columns carries
//!   `None` coordinates instead of NaN placeholders.
//! * **Generics**: Numeric columns are generic over `Float` (default `f64`).
//!
//! ## Invariants
//!
//! * All columns of a set have the same length.
//! * Order is insertion order; duplicates are allowed.
//!
//! ## Non-goals
//!
//! * This module does not filter non-finite values (the matchers do).
//! * This module does not sort or deduplicate.

// External dependencies
use chrono::{DateTime, Utc};
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::errors::FusionError;

// ============================================================================
// Observation
// ============================================================================

/// A single timestamped point measurement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation<T = f64> {
    /// Measurement instant.
    pub time: DateTime<Utc>,

    /// Latitude in degrees.
    pub lat: T,

    /// Longitude in degrees.
    pub lon: T,

    /// Measured value. May be NaN.
    pub value: T,

    /// Measured parameter, e.g. `"no2"`.
    pub parameter: String,

    /// Unit of `value`, e.g. `"ppb"`.
    pub unit: String,
}

impl<T: Float> Observation<T> {
    /// Create an observation with empty parameter and unit labels.
    pub fn new(time: DateTime<Utc>, lat: T, lon: T, value: T) -> Self {
        Self {
            time,
            lat,
            lon,
            value,
            parameter: String::new(),
            unit: String::new(),
        }
    }

    /// Attach a parameter name and unit.
    pub fn labelled(mut self, parameter: impl Into<String>, unit: impl Into<String>) -> Self {
        self.parameter = parameter.into();
        self.unit = unit.into();
        self
    }
}

// ============================================================================
// Observation Set
// ============================================================================

/// Latitude and longitude columns of an [`ObservationSet`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinates<T = f64> {
    /// Latitude column in degrees.
    pub lat: Vec<T>,

    /// Longitude column in degrees.
    pub lon: Vec<T>,
}

impl<T> Default for Coordinates<T> {
    fn default() -> Self {
        Self {
            lat: Vec::new(),
            lon: Vec::new(),
        }
    }
}

/// Insertion-ordered columnar collection of observations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObservationSet<T = f64> {
    time: Vec<DateTime<Utc>>,
    coordinates: Option<Coordinates<T>>,
    value: Vec<T>,
    parameter: Vec<String>,
    unit: Vec<String>,
}

impl<T: Float> Default for ObservationSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ObservationSet<T> {
    /// Create an empty, located collection.
    pub fn new() -> Self {
        Self {
            time: Vec::new(),
            coordinates: Some(Coordinates::default()),
            value: Vec::new(),
            parameter: Vec::new(),
            unit: Vec::new(),
        }
    }

    /// Build a collection from materialised columns.
    ///
    /// `coordinates` is `(lat, lon)` or `None` when the source carries no
    /// position columns. Every row shares `parameter` and `unit`.
    ///
    /// Fails with [`FusionError::MismatchedColumns`] when a column length
    /// differs from the `time` column.
    pub fn from_columns(
        time: Vec<DateTime<Utc>>,
        coordinates: Option<(Vec<T>, Vec<T>)>,
        value: Vec<T>,
        parameter: &str,
        unit: &str,
    ) -> Result<Self, FusionError> {
        let n = time.len();
        check_column("value", n, value.len())?;

        let coordinates = match coordinates {
            Some((lat, lon)) => {
                check_column("lat", n, lat.len())?;
                check_column("lon", n, lon.len())?;
                Some(Coordinates { lat, lon })
            }
            None => None,
        };

        Ok(Self {
            time,
            coordinates,
            value,
            parameter: vec![parameter.to_owned(); n],
            unit: vec![unit.to_owned(); n],
        })
    }

    /// Append an observation.
    ///
    /// On a collection without coordinates the position is discarded.
    pub fn push(&mut self, obs: Observation<T>) {
        self.time.push(obs.time);
        if let Some(coords) = self.coordinates.as_mut() {
            coords.lat.push(obs.lat);
            coords.lon.push(obs.lon);
        }
        self.value.push(obs.value);
        self.parameter.push(obs.parameter);
        self.unit.push(obs.unit);
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the collection has no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Time column.
    #[inline]
    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.time
    }

    /// Value column.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.value
    }

    /// `(lat, lon)` columns, or `None` for an unlocated collection.
    #[inline]
    pub fn coordinates(&self) -> Option<(&[T], &[T])> {
        self.coordinates
            .as_ref()
            .map(|c| (c.lat.as_slice(), c.lon.as_slice()))
    }

    /// Parameter column.
    pub fn parameters(&self) -> &[String] {
        &self.parameter
    }

    /// Unit column.
    pub fn units(&self) -> &[String] {
        &self.unit
    }

    /// Row `i` as an owned [`Observation`].
    ///
    /// Returns `None` when `i` is out of range or the collection is unlocated.
    pub fn get(&self, i: usize) -> Option<Observation<T>> {
        let coords = self.coordinates.as_ref()?;
        if i >= self.len() {
            return None;
        }
        Some(Observation {
            time: self.time[i],
            lat: coords.lat[i],
            lon: coords.lon[i],
            value: self.value[i],
            parameter: self.parameter[i].clone(),
            unit: self.unit[i].clone(),
        })
    }

    /// Iterate over rows in insertion order (empty when unlocated).
    pub fn iter(&self) -> impl Iterator<Item = Observation<T>> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

impl<T: Float> FromIterator<Observation<T>> for ObservationSet<T> {
    fn from_iter<I: IntoIterator<Item = Observation<T>>>(iter: I) -> Self {
        let mut set = Self::new();
        for obs in iter {
            set.push(obs);
        }
        set
    }
}

impl<T: Float> From<Vec<Observation<T>>> for ObservationSet<T> {
    fn from(rows: Vec<Observation<T>>) -> Self {
        rows.into_iter().collect()
    }
}

fn check_column(column: &'static str, expected: usize, got: usize) -> Result<(), FusionError> {
    if got != expected {
        return Err(FusionError::MismatchedColumns {
            column,
            expected,
            got,
        });
    }
    Ok(())
}
