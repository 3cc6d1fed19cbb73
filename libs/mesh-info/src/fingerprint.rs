//! # Snapshot Fingerprint
//!
//! Content-based hash of a mesh snapshot, used by the cache to notice
//! changes without keeping a copy of the previous mesh around.
//!
//! Coordinates are hashed by their IEEE bit pattern, so `0.0` and `-0.0`
//! differ and a NaN hashes like any other value. A false mismatch only
//! costs a recomputation.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::snapshot::{MeshSnapshot, Space};

/// Opaque 64-bit fingerprint of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Fingerprints a snapshot measured in its own coordinates.
    ///
    /// Linear in vertex and index count, no allocation.
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use mesh_info::{Fingerprint, MeshSnapshot};
    ///
    /// let a = MeshSnapshot::from_triangles(vec![DVec3::ZERO, DVec3::X, DVec3::Y], &[[0, 1, 2]]);
    /// let b = a.clone();
    /// assert_eq!(Fingerprint::of(&a), Fingerprint::of(&b));
    /// ```
    pub fn of(snapshot: &MeshSnapshot) -> Self {
        let mut hasher = DefaultHasher::new();
        hash_snapshot(snapshot, &mut hasher);
        Self(hasher.finish())
    }

    /// Fingerprints a snapshot together with the space it is measured in.
    ///
    /// Object space gives the same value as [`Fingerprint::of`].
    pub fn of_in(snapshot: &MeshSnapshot, space: &Space) -> Self {
        let mut hasher = DefaultHasher::new();
        hash_snapshot(snapshot, &mut hasher);

        if let Some(matrix) = space.matrix() {
            for value in matrix.to_cols_array() {
                value.to_bits().hash(&mut hasher);
            }
        }

        Self(hasher.finish())
    }

    /// Returns the raw hash value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

fn hash_snapshot<H: Hasher>(snapshot: &MeshSnapshot, hasher: &mut H) {
    snapshot.vertex_count().hash(hasher);
    snapshot.face_count().hash(hasher);

    for v in snapshot.vertices() {
        v.x.to_bits().hash(hasher);
        v.y.to_bits().hash(hasher);
        v.z.to_bits().hash(hasher);
    }

    // Length prefix keeps [0,1,2][3,4,5] apart from [0,1,2,3][4,5].
    for face in snapshot.faces() {
        face.hash(hasher);
    }
}
