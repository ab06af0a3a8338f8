//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used by the matchers,
//! the AQI calculator and the metrics:
//! - Great-circle distance
//! - Stable argmin and per-axis nearest lookup
//! - NaN-aware means and guarded correlation
//! - Round-half-to-even
//!
//! These are reusable mathematical building blocks with no domain logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Haversine great-circle distance.
pub mod geodesic;

/// Stable argmin and nearest-index search.
pub mod nearest;

/// Means and Pearson correlation.
pub mod stats;

/// Round-half-to-even.
pub mod rounding;
