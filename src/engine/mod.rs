//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer validates caller parameters and drives the per-element
//! collocation algorithms over whole collections, sequentially or on the
//! rayon pool.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Per-collection execution of the matchers.
pub mod executor;

/// Parameter validation.
pub mod validator;
