//! # Mesh Snapshot
//!
//! Immutable polygon mesh handed to the kernel: ordered vertex positions
//! and ordered faces of vertex indices.
//!
//! ## Structure
//!
//! - `Face` - ordered vertex indices of one polygon, winding sets the normal
//! - `MeshSnapshot` - vertices plus faces, compared element-wise
//! - `ValidatedMesh` - borrow proving the snapshot passed `validate()`
//! - `Space` - object or world space measurement
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use mesh_info::{Face, MeshSnapshot};
//!
//! let mesh = MeshSnapshot::new(
//!     vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
//!     vec![Face::new(vec![0, 1, 2, 3])],
//! );
//! assert_eq!(mesh.triangle_count(), 2);
//! assert!(mesh.validate().is_ok());
//! ```


use config::constants::MIN_FACE_VERTICES;
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::{MeshInfoError, MeshResult};

/// A vertex position. All geometry is f64.
pub type Vertex = DVec3;

// =============================================================================
// FACE
// =============================================================================

/// One polygon of a mesh, as an ordered list of vertex indices.
///
/// Faces with more than three indices are treated as a fan around their
/// first vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face(Vec<u32>);

impl Face {
    /// Creates a face from vertex indices in traversal order.
    pub fn new(indices: Vec<u32>) -> Self {
        Self(indices)
    }

    /// Creates a triangle face.
    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self(vec![a, b, c])
    }

    /// Returns the vertex indices.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Returns the number of indices.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the face has no indices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of triangles the face fans into.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.0.len().saturating_sub(2)
    }

    /// Fan triangulation around the first index.
    ///
    /// A face `[i0, i1, ..., in]` yields `[i0, i1, i2]`, `[i0, i2, i3]`, ...
    /// in that order. Faces with fewer than three indices yield nothing.
    ///
    /// ```rust
    /// use mesh_info::Face;
    ///
    /// let quad = Face::new(vec![4, 5, 6, 7]);
    /// let fan: Vec<_> = quad.fan().collect();
    /// assert_eq!(fan, vec![[4, 5, 6], [4, 6, 7]]);
    /// ```
    pub fn fan(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        let pivot = self.0.first().copied().unwrap_or_default();
        self.0
            .windows(2)
            .skip(1)
            .map(move |edge| [pivot, edge[0], edge[1]])
    }

    /// Returns the face with its winding reversed.
    ///
    /// The first index stays in place so the fan pivot does not move.
    pub fn reversed(&self) -> Self {
        let mut indices = self.0.clone();
        if indices.len() > 1 {
            indices[1..].reverse();
        }
        Self(indices)
    }
}

impl From<[u32; 3]> for Face {
    fn from(tri: [u32; 3]) -> Self {
        Self(tri.to_vec())
    }
}

impl From<Vec<u32>> for Face {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Immutable view of a polygon mesh at one point in time.
///
/// Construction does not validate; call [`MeshSnapshot::validate`] (the
/// kernel and the cache do) before trusting the indices. Two snapshots are
/// equal iff their vertex and face sequences are element-wise equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshSnapshot {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl MeshSnapshot {
    /// Creates a snapshot from vertices and faces.
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Creates a snapshot with no vertices and no faces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a snapshot from a triangle index list.
    pub fn from_triangles(vertices: Vec<Vertex>, triangles: &[[u32; 3]]) -> Self {
        let faces = triangles.iter().copied().map(Face::from).collect();
        Self { vertices, faces }
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns the number of triangles after fanning every face.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(Face::triangle_count).sum()
    }

    /// Returns true if the snapshot has neither vertices nor faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    /// Checks the structural invariant.
    ///
    /// Every face needs at least three indices and every index must be
    /// below the vertex count. The first offending face in snapshot order
    /// is reported. Coordinates are not inspected: non-finite values are
    /// allowed and propagate as NaN.
    ///
    /// # Errors
    ///
    /// [`MeshInfoError::MalformedMesh`] naming the face and the reason.
    pub fn validate(&self) -> MeshResult<ValidatedMesh<'_>> {
        let vertex_count = self.vertices.len();

        for (face_index, face) in self.faces.iter().enumerate() {
            if face.len() < MIN_FACE_VERTICES {
                return Err(MeshInfoError::too_few_indices(face_index, face.len()));
            }

            if let Some(&index) = face
                .indices()
                .iter()
                .find(|&&index| index as usize >= vertex_count)
            {
                return Err(MeshInfoError::index_out_of_range(
                    face_index,
                    index,
                    vertex_count,
                ));
            }
        }

        Ok(ValidatedMesh { snapshot: self })
    }

    /// Returns a copy with every vertex mapped through an affine transform.
    ///
    /// Faces are shared unchanged. A transform with negative determinant
    /// (a mirror) flips the sign of the measured volume.
    pub fn transformed(&self, matrix: &DMat4) -> Self {
        let vertices = self
            .vertices
            .iter()
            .map(|v| matrix.transform_point3(*v))
            .collect();

        Self {
            vertices,
            faces: self.faces.clone(),
        }
    }

    /// Returns a copy with the winding of every face reversed.
    pub fn reversed(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            faces: self.faces.iter().map(Face::reversed).collect(),
        }
    }
}

// =============================================================================
// VALIDATED MESH
// =============================================================================

/// A snapshot that passed [`MeshSnapshot::validate`].
///
/// Only obtainable through validation, so code holding one may index
/// vertices by face indices without further checks.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedMesh<'a> {
    snapshot: &'a MeshSnapshot,
}

impl<'a> ValidatedMesh<'a> {
    /// Returns the underlying snapshot.
    #[inline]
    pub fn snapshot(&self) -> &'a MeshSnapshot {
        self.snapshot
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn vertices(&self) -> &'a [Vertex] {
        &self.snapshot.vertices
    }

    /// Returns the faces.
    #[inline]
    pub fn faces(&self) -> &'a [Face] {
        &self.snapshot.faces
    }

    /// Vouches for a transformed copy of an already validated snapshot.
    ///
    /// `transformed` must share the source's faces and vertex count, as
    /// [`MeshSnapshot::transformed`] guarantees.
    pub(crate) fn transformed_from(
        source: ValidatedMesh<'_>,
        transformed: &'a MeshSnapshot,
    ) -> Self {
        debug_assert_eq!(source.vertices().len(), transformed.vertex_count());
        debug_assert_eq!(source.faces(), transformed.faces());
        Self {
            snapshot: transformed,
        }
    }

    /// Returns the positions of a fan triangle.
    #[inline]
    pub(crate) fn corners(&self, tri: [u32; 3]) -> [Vertex; 3] {
        let v = &self.snapshot.vertices;
        [v[tri[0] as usize], v[tri[1] as usize], v[tri[2] as usize]]
    }
}

// =============================================================================
// SPACE
// =============================================================================

/// Coordinate space a mesh is measured in.
///
/// Object space uses the snapshot's coordinates as given. World space maps
/// them through the object's world matrix first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Space {
    /// Measure the snapshot's own coordinates.
    #[default]
    Object,
    /// Measure after applying the world transform.
    World(DMat4),
}

impl Space {
    /// Returns the world matrix, if any.
    pub fn matrix(&self) -> Option<&DMat4> {
        match self {
            Space::Object => None,
            Space::World(matrix) => Some(matrix),
        }
    }
}
