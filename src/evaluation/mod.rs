//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer scores collocated pairs (bias, RMSE, correlation).
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Agreement metrics.
pub mod metrics;
