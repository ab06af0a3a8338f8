//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the core per-element algorithms:
//! - Point-to-point collocation (`collocation`)
//! - Point-to-grid sampling (`grid_sampling`)
//! - AQI breakpoint conversion and composite selection (`aqi`)
//!
//! Each collocation routine resolves a single driving element; the engine
//! layer runs them over whole collections.
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Point-to-point collocation.
pub mod collocation;

/// Point-to-grid collocation.
pub mod grid_sampling;

/// AQI breakpoint tables and composite index.
pub mod aqi;
