//! # Primitives
//!
//! Small closed meshes with known volume and area, wound outward.

use glam::DVec3;

use crate::snapshot::{Face, MeshSnapshot};

/// Axis-aligned box with one corner at the origin.
///
/// Six quad faces, counter-clockwise seen from outside. Volume is
/// `x * y * z`, area `2 * (xy + xz + yz)`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_info::primitives::cuboid;
///
/// let mesh = cuboid(DVec3::new(1.0, 2.0, 3.0));
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.face_count(), 6);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn cuboid(size: DVec3) -> MeshSnapshot {
    let DVec3 { x, y, z } = size;

    let vertices = vec![
        DVec3::new(0.0, 0.0, 0.0), // 0
        DVec3::new(x, 0.0, 0.0),   // 1
        DVec3::new(x, y, 0.0),     // 2
        DVec3::new(0.0, y, 0.0),   // 3
        DVec3::new(0.0, 0.0, z),   // 4
        DVec3::new(x, 0.0, z),     // 5
        DVec3::new(x, y, z),       // 6
        DVec3::new(0.0, y, z),     // 7
    ];

    let faces = vec![
        Face::new(vec![0, 3, 2, 1]), // bottom (-Z)
        Face::new(vec![4, 5, 6, 7]), // top (+Z)
        Face::new(vec![0, 1, 5, 4]), // front (-Y)
        Face::new(vec![3, 7, 6, 2]), // back (+Y)
        Face::new(vec![0, 4, 7, 3]), // left (-X)
        Face::new(vec![1, 2, 6, 5]), // right (+X)
    ];

    MeshSnapshot::new(vertices, faces)
}

/// Right tetrahedron on the unit axes.
///
/// Volume `1/6`, area `3/2 + sqrt(3)/2`.
pub fn tetrahedron() -> MeshSnapshot {
    MeshSnapshot::from_triangles(
        vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z],
        &[[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
    )
}
