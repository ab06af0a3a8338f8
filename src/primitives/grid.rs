//! Rectilinear gridded fields.
//!
//! ## Purpose
//!
//! This module defines [`GriddedField`], a lattice of latitude, longitude and
//! optional time axes carrying one or more dense variables, such as a
//! satellite retrieval product.
//!
//! ## Design notes
//!
//! * **Layout**: Variables are stored row-major in `(time?, lat, lon)` order.
//! * **Validated**: Shapes are checked when variables or the time axis are
//!   attached, so sampling never needs to re-validate.
//!
//! ## Invariants
//!
//! * Every variable has exactly `n_time * n_lat * n_lon` cells, where
//!   `n_time = 1` without a time axis.
//!
//! ## Non-goals
//!
//! * Axes are not required to be sorted; callers own axis sanity.
//! * No curvilinear or irregular grids.

// Standard library
use std::collections::BTreeMap;

// External dependencies
use chrono::{DateTime, Utc};
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::primitives::errors::FusionError;

/// Rectilinear lattice with named dense variables.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GriddedField<T = f64> {
    lat: Vec<T>,
    lon: Vec<T>,
    time: Option<Vec<DateTime<Utc>>>,
    variables: BTreeMap<String, Vec<T>>,
}

impl<T: Float> GriddedField<T> {
    /// Create a field over the given latitude and longitude axes.
    pub fn new(lat: Vec<T>, lon: Vec<T>) -> Self {
        Self {
            lat,
            lon,
            time: None,
            variables: BTreeMap::new(),
        }
    }

    /// Attach a time axis.
    ///
    /// Fails if an already attached variable no longer fits the lattice.
    pub fn with_time(mut self, time: Vec<DateTime<Utc>>) -> Result<Self, FusionError> {
        self.time = Some(time);
        let expected = self.cell_count();
        for (name, data) in &self.variables {
            check_shape(name, expected, data.len())?;
        }
        Ok(self)
    }

    /// Attach a dense variable in `(time?, lat, lon)` row-major order.
    pub fn with_variable(
        mut self,
        name: impl Into<String>,
        data: Vec<T>,
    ) -> Result<Self, FusionError> {
        let name = name.into();
        check_shape(&name, self.cell_count(), data.len())?;
        self.variables.insert(name, data);
        Ok(self)
    }

    /// Latitude axis.
    #[inline]
    pub fn lat(&self) -> &[T] {
        &self.lat
    }

    /// Longitude axis.
    #[inline]
    pub fn lon(&self) -> &[T] {
        &self.lon
    }

    /// Time axis, if any.
    #[inline]
    pub fn time(&self) -> Option<&[DateTime<Utc>]> {
        self.time.as_deref()
    }

    /// Dense data for `name`.
    pub fn variable(&self, name: &str) -> Option<&[T]> {
        self.variables.get(name).map(Vec::as_slice)
    }

    /// Whether a variable named `name` is attached.
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Names of attached variables, sorted.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    /// Number of cells per variable.
    pub fn cell_count(&self) -> usize {
        let n_time = self.time.as_ref().map_or(1, Vec::len);
        n_time * self.lat.len() * self.lon.len()
    }

    /// Sample `name` at the given indices.
    ///
    /// `t` is required when the field has a time axis and ignored otherwise.
    /// Returns `None` for unknown variables or out-of-range indices.
    pub fn sample(&self, name: &str, t: Option<usize>, i_lat: usize, i_lon: usize) -> Option<T> {
        let data = self.variables.get(name)?;
        let t = match (&self.time, t) {
            (Some(axis), Some(t)) if t < axis.len() => t,
            (Some(_), _) => return None,
            (None, _) => 0,
        };
        if i_lat >= self.lat.len() || i_lon >= self.lon.len() {
            return None;
        }
        let idx = (t * self.lat.len() + i_lat) * self.lon.len() + i_lon;
        data.get(idx).copied()
    }
}

fn check_shape(name: &str, expected: usize, got: usize) -> Result<(), FusionError> {
    if got != expected {
        return Err(FusionError::GridShapeMismatch {
            variable: name.to_owned(),
            expected,
            got,
        });
    }
    Ok(())
}
