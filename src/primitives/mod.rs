//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data model and error type shared by every other
//! layer:
//! - Point observations and their columnar collections
//! - Rectilinear gridded fields
//! - Collocation match records
//! - The crate error type
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error type and error kinds.
pub mod errors;

/// Observation records and collections.
pub mod observation;

/// Gridded fields.
pub mod grid;

/// Match records and match sets.
pub mod matches;
