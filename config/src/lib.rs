//! # Config Crate
//!
//! Centralized configuration constants for mesh measurement.
//! All magic numbers and tunable parameters are defined here so the
//! kernel, the cache and the tests agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, MIN_FACE_VERTICES};
//!
//! let value: f64 = 1e-11;
//! assert!(value.abs() < EPSILON);
//!
//! let face = [0u32, 1, 2];
//! assert!(face.len() >= MIN_FACE_VERTICES);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain `const` items only

pub mod constants;
