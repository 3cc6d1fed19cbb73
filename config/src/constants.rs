//! # Configuration Constants
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Topology**: Structural limits for mesh faces
//! - **Scheduling**: When work moves onto the thread pool

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Relative tolerance for comparing measured volumes and areas.
///
/// Results are bit-reproducible for a given snapshot, so this only matters
/// when comparing meshes that describe the same shape differently (a quad
/// versus two triangles, a transformed copy, a box built by hand).
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() <= EPSILON * a.abs().max(b.abs()).max(1.0)
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-12));
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// TOPOLOGY CONSTANTS
// =============================================================================

/// Minimum number of vertex indices in a face.
///
/// Anything shorter cannot be fanned into a triangle and is rejected as a
/// malformed mesh.
pub const MIN_FACE_VERTICES: usize = 3;

// =============================================================================
// SCHEDULING CONSTANTS
// =============================================================================

/// Face count at which measurement is split across the rayon pool.
///
/// Below this, thread dispatch costs more than the arithmetic it saves.
///
/// # Example
///
/// ```rust
/// use config::constants::PARALLEL_FACE_THRESHOLD;
///
/// let face_count = 12;
/// let parallel = face_count >= PARALLEL_FACE_THRESHOLD;
/// assert!(!parallel);
/// ```
pub const PARALLEL_FACE_THRESHOLD: usize = 16_384;
