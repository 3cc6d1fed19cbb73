//! # Error Types
//!
//! Errors for mesh measurement. The only failure is a structurally
//! malformed snapshot; numeric degeneracy (NaN, infinities, slivers) is
//! not an error and flows through IEEE arithmetic instead.
//!
//! ## Error Policy
//!
//! - Malformed input is never silently repaired
//! - Validation runs before any arithmetic, so there are no partial results
//! - Errors name the offending face and value

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while measuring a mesh.
///
/// ## Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_info::{compute_volume, Face, MeshInfoError, MeshSnapshot};
///
/// let mesh = MeshSnapshot::new(vec![DVec3::ZERO], vec![Face::new(vec![0, 1, 2])]);
/// match compute_volume(&mesh) {
///     Err(MeshInfoError::MalformedMesh { face, reason }) => {
///         assert_eq!(face, 0);
///         eprintln!("rejected: {reason}");
///     }
///     Ok(volume) => println!("volume = {volume}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshInfoError {
    /// The snapshot violates its structural invariant.
    ///
    /// Recoverable only by supplying a corrected snapshot.
    #[error("Malformed mesh: face {face}: {reason}")]
    MalformedMesh {
        /// Index of the first offending face in snapshot order
        face: usize,
        /// What is wrong with that face
        reason: MalformedReason,
    },
}

/// Why a face was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// A face refers to a vertex that does not exist.
    #[error("vertex index {index} out of range (vertex count: {vertex_count})")]
    IndexOutOfRange {
        /// The offending index
        index: u32,
        /// Number of vertices in the snapshot
        vertex_count: usize,
    },

    /// A face has too few indices to span a triangle.
    #[error("{count} indices (min: {min})", min = config::constants::MIN_FACE_VERTICES)]
    TooFewIndices {
        /// Number of indices the face has
        count: usize,
    },
}

impl MeshInfoError {
    /// Creates an out-of-range index error.
    pub fn index_out_of_range(face: usize, index: u32, vertex_count: usize) -> Self {
        Self::MalformedMesh {
            face,
            reason: MalformedReason::IndexOutOfRange {
                index,
                vertex_count,
            },
        }
    }

    /// Creates a too-few-indices error.
    pub fn too_few_indices(face: usize, count: usize) -> Self {
        Self::MalformedMesh {
            face,
            reason: MalformedReason::TooFewIndices { count },
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for measurement operations.
pub type MeshResult<T> = Result<T, MeshInfoError>;

// =============================================================================
// TESTS
// =============================================================================
