//! Collocation match records.
//!
//! ## Purpose
//!
//! This module defines [`Match`], one collocated pair, and [`MatchSet`], the
//! ordered collection returned by the matchers.
//!
//! ## Design notes
//!
//! * **Value type**: A match is never mutated after emission.
//! * **Ordering**: Matches appear in the order of the driving collection.
//! * **Export**: `to_csv` writes the flat export used by reporting endpoints;
//!   `Display` prints a readable table.
//!
//! ## Invariants
//!
//! * `distance_km` and the time gap were checked against the caller's
//!   tolerances when the match was emitted.

// Standard library
use std::fmt::{self, Display, Formatter, Write};
use std::ops::Index;
use std::slice;

// External dependencies
use chrono::{DateTime, Utc};
use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timestamp layout used by the CSV export (second resolution, no zone).
pub const CSV_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Header row of the CSV export.
pub const CSV_HEADER: &str = "a_value,b_value,distance_km,a_time";

// ============================================================================
// Match
// ============================================================================

/// One collocated pair.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Match<T = f64> {
    /// Value from the driving source.
    pub a_value: T,

    /// Value from the matched source (observation or grid sample).
    pub b_value: T,

    /// Great-circle distance between the pair in kilometres.
    pub distance_km: T,

    /// Time of the driving observation.
    pub a_time: DateTime<Utc>,

    /// Time of the matched observation; `None` for grid samples.
    pub b_time: Option<DateTime<Utc>>,
}

// ============================================================================
// Match Set
// ============================================================================

/// Ordered collection of matches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchSet<T = f64> {
    matches: Vec<Match<T>>,
}

impl<T: Float> Default for MatchSet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Float> MatchSet<T> {
    /// A set with no matches.
    pub fn empty() -> Self {
        Self {
            matches: Vec::new(),
        }
    }

    /// Number of matches.
    #[inline]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether no match was found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matches as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Match<T>] {
        &self.matches
    }

    /// Iterate over matches in emission order.
    pub fn iter(&self) -> slice::Iter<'_, Match<T>> {
        self.matches.iter()
    }

    /// Driving-source values.
    pub fn a_values(&self) -> Vec<T> {
        self.matches.iter().map(|m| m.a_value).collect()
    }

    /// Matched-source values.
    pub fn b_values(&self) -> Vec<T> {
        self.matches.iter().map(|m| m.b_value).collect()
    }

    /// Consume the set, returning the underlying vector.
    pub fn into_vec(self) -> Vec<Match<T>> {
        self.matches
    }

    /// Render as CSV with header `a_value,b_value,distance_km,a_time`.
    ///
    /// Rows are joined by `\n` with no trailing newline. An empty set renders
    /// as the header followed by a single `\n`. Non-finite values are written
    /// as `nan`, `inf` and `-inf`.
    pub fn to_csv(&self) -> String {
        let mut out = String::with_capacity(CSV_HEADER.len() + 1 + self.len() * 48);
        out.push_str(CSV_HEADER);
        if self.is_empty() {
            out.push('\n');
            return out;
        }
        for m in &self.matches {
            // Writing to a String cannot fail.
            let _ = write!(
                out,
                "\n{},{},{},{}",
                CsvFloat(as_f64(m.a_value)),
                CsvFloat(as_f64(m.b_value)),
                CsvFloat(as_f64(m.distance_km)),
                m.a_time.format(CSV_TIME_FORMAT)
            );
        }
        out
    }
}

impl<T: Float> From<Vec<Match<T>>> for MatchSet<T> {
    fn from(matches: Vec<Match<T>>) -> Self {
        Self { matches }
    }
}

impl<T> Index<usize> for MatchSet<T> {
    type Output = Match<T>;

    fn index(&self, i: usize) -> &Match<T> {
        &self.matches[i]
    }
}

impl<T> IntoIterator for MatchSet<T> {
    type Item = Match<T>;
    type IntoIter = std::vec::IntoIter<Match<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a MatchSet<T> {
    type Item = &'a Match<T>;
    type IntoIter = slice::Iter<'a, Match<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

impl<T: Float> Display for MatchSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Matches: {}", self.len())?;

        if self.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "Matched Pairs:")?;
        writeln!(
            f,
            "  {:>12} {:>12} {:>12}  {:<19}  {:<19}",
            "A_value", "B_value", "Distance_km", "A_time", "B_time"
        )?;
        writeln!(f, "  {}", "-".repeat(80))?;
        for m in &self.matches {
            let b_time = m
                .b_time
                .map(|t| t.format(CSV_TIME_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_owned());
            writeln!(
                f,
                "  {:>12.5} {:>12.5} {:>12.4}  {:<19}  {:<19}",
                as_f64(m.a_value),
                as_f64(m.b_value),
                as_f64(m.distance_km),
                m.a_time.format(CSV_TIME_FORMAT),
                b_time
            )?;
        }
        Ok(())
    }
}

/// Shortest round-trip float text with lowercase non-finite spellings.
struct CsvFloat(f64);

impl Display for CsvFloat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            v if v.is_nan() => f.write_str("nan"),
            v if v == f64::INFINITY => f.write_str("inf"),
            v if v == f64::NEG_INFINITY => f.write_str("-inf"),
            v => write!(f, "{:?}", v),
        }
    }
}

#[inline]
fn as_f64<T: Float>(v: T) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}
