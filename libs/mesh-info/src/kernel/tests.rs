/// Tests for the geometry kernel.
///
/// These tests verify that the kernel:
/// - Measures boxes and tetrahedra exactly (within rounding)
/// - Flips the volume sign, and only the sign, when winding is reversed
/// - Treats degenerate faces as zero contributions
/// - Rejects malformed snapshots before doing arithmetic
/// - Gives bit-identical results on the sequential and parallel paths

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{DMat4, DVec3};

    use crate::error::MeshInfoError;
    use crate::kernel::{
        compute_area, compute_mesh_info, compute_volume, GeometryKernel, MeshInfo, MeshMeasure,
    };
    use crate::primitives::{cuboid, tetrahedron};
    use crate::settings::KernelConfig;
    use crate::snapshot::{Face, MeshSnapshot};

    /// Flat grid of `n * n` quads, wound to face +Z, lifted to `z`.
    fn quad_grid(n: u32, z: f64) -> MeshSnapshot {
        let mut vertices = Vec::with_capacity(((n + 1) * (n + 1)) as usize);
        for j in 0..=n {
            for i in 0..=n {
                vertices.push(DVec3::new(i as f64, j as f64, z));
            }
        }

        let row = n + 1;
        let mut faces = Vec::with_capacity((n * n) as usize);
        for j in 0..n {
            for i in 0..n {
                let v = j * row + i;
                faces.push(Face::new(vec![v, v + 1, v + row + 1, v + row]));
            }
        }

        MeshSnapshot::new(vertices, faces)
    }

    // =========================================================================
    // VOLUME AND AREA
    // =========================================================================

    /// Test that a unit cube measures volume 1 and area 6.
    #[test]
    fn test_unit_cube() {
        let mesh = cuboid(DVec3::ONE);
        assert_relative_eq!(compute_volume(&mesh).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(compute_area(&mesh).unwrap(), 6.0, epsilon = 1e-12);
    }

    /// Test that boxes of mixed proportions measure `w*h*d` and their face areas.
    #[test]
    fn test_box_dimensions() {
        for (w, h, d) in [(2.0, 3.0, 4.0), (0.5, 10.0, 0.25), (100.0, 1e-3, 7.0)] {
            let mesh = cuboid(DVec3::new(w, h, d));
            let info = compute_mesh_info(&mesh).unwrap();

            assert_relative_eq!(info.volume, w * h * d, max_relative = 1e-10);
            assert_relative_eq!(info.area, 2.0 * (w * h + w * d + h * d), max_relative = 1e-10);
        }
    }

    /// Test that the corner tetrahedron measures 1/6 volume.
    #[test]
    fn test_tetrahedron() {
        let info = compute_mesh_info(&tetrahedron()).unwrap();
        assert_relative_eq!(info.volume, 1.0 / 6.0, epsilon = 1e-14);
        assert_relative_eq!(info.area, 1.5 + 3f64.sqrt() / 2.0, epsilon = 1e-14);
    }

    /// Test that translating a closed box leaves volume and area unchanged.
    ///
    /// Enclosed volume of a closed mesh does not depend on the origin.
    #[test]
    fn test_volume_translation_invariant() {
        let mesh = cuboid(DVec3::new(2.0, 3.0, 4.0));
        let moved = mesh.transformed(&DMat4::from_translation(DVec3::new(-50.0, 20.0, 7.5)));

        assert_relative_eq!(compute_volume(&moved).unwrap(), 24.0, max_relative = 1e-10);
        assert_relative_eq!(compute_area(&moved).unwrap(), 52.0, max_relative = 1e-10);
    }

    /// Test that a mirroring transform negates the volume but not the area.
    #[test]
    fn test_mirror_flips_volume() {
        let mesh = cuboid(DVec3::new(2.0, 3.0, 4.0));
        let mirrored = mesh.transformed(&DMat4::from_scale(DVec3::new(-1.0, 1.0, 1.0)));
        let info = compute_mesh_info(&mirrored).unwrap();

        assert_relative_eq!(info.volume, -24.0, max_relative = 1e-12);
        assert_relative_eq!(info.unsigned_volume(), 24.0, max_relative = 1e-12);
        assert_relative_eq!(info.area, 52.0, max_relative = 1e-12);
    }

    // =========================================================================
    // WINDING
    // =========================================================================

    /// Test that reversing every face negates the volume and keeps the area.
    #[test]
    fn test_reversed_winding_negates_volume() {
        for mesh in [cuboid(DVec3::new(2.0, 3.0, 4.0)), tetrahedron()] {
            let forward = compute_mesh_info(&mesh).unwrap();
            let backward = compute_mesh_info(&mesh.reversed()).unwrap();

            assert!(forward.volume > 0.0);
            assert_relative_eq!(backward.volume, -forward.volume, max_relative = 1e-12);
            assert_relative_eq!(backward.area, forward.area, max_relative = 1e-12);
        }
    }

    /// Test that an open surface is measured without a closedness check.
    ///
    /// An open surface still integrates to whatever its faces give.
    #[test]
    fn test_open_mesh_reports_raw_integral() {
        // Single unit quad at z = 1 facing +Z: pyramid with apex at the origin.
        let mesh = quad_grid(1, 1.0);
        let info = compute_mesh_info(&mesh).unwrap();

        assert_relative_eq!(info.volume, 1.0 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(info.area, 1.0, epsilon = 1e-15);
    }

    // =========================================================================
    // FAN TRIANGULATION
    // =========================================================================

    /// Test that a quad measures the same as its two fan triangles.
    #[test]
    fn test_quad_matches_triangle_pair() {
        let vertices = vec![
            DVec3::new(0.0, 0.0, 2.0),
            DVec3::new(3.0, 0.0, 2.0),
            DVec3::new(3.0, 1.5, 2.0),
            DVec3::new(0.0, 1.5, 2.0),
        ];
        let quad = MeshSnapshot::new(vertices.clone(), vec![Face::new(vec![0, 1, 2, 3])]);
        let pair = MeshSnapshot::from_triangles(vertices, &[[0, 1, 2], [0, 2, 3]]);

        let a = compute_mesh_info(&quad).unwrap();
        let b = compute_mesh_info(&pair).unwrap();

        assert_relative_eq!(a.area, b.area, epsilon = 1e-12);
        assert_relative_eq!(a.volume, b.volume, epsilon = 1e-12);
        assert_relative_eq!(a.area, 4.5, epsilon = 1e-12);
    }

    /// Test that a hexagon face gets the area of the regular polygon.
    ///
    /// A regular hexagon fans into four triangles with the polygon's area.
    #[test]
    fn test_hexagon_area() {
        let vertices: Vec<DVec3> = (0..6)
            .map(|k| {
                let angle = std::f64::consts::PI / 3.0 * k as f64;
                DVec3::new(angle.cos(), angle.sin(), 0.0)
            })
            .collect();
        let mesh = MeshSnapshot::new(vertices, vec![Face::new(vec![0, 1, 2, 3, 4, 5])]);

        let info = compute_mesh_info(&mesh).unwrap();
        assert_relative_eq!(info.area, 3.0 * 3f64.sqrt() / 2.0, epsilon = 1e-12);
        assert_eq!(info.volume, 0.0);
    }

    // =========================================================================
    // DEGENERATE AND EMPTY INPUT
    // =========================================================================

    /// Test that an empty snapshot measures zero.
    #[test]
    fn test_empty_mesh_is_zero() {
        let info = compute_mesh_info(&MeshSnapshot::empty()).unwrap();
        assert_eq!(info, MeshInfo::ZERO);
    }

    /// Test that a snapshot with vertices but no faces measures zero.
    ///
    /// Vertices without faces measure nothing.
    #[test]
    fn test_point_cloud_is_zero() {
        let mesh = MeshSnapshot::new(vec![DVec3::ONE, DVec3::X], vec![]);
        assert_eq!(compute_volume(&mesh).unwrap(), 0.0);
        assert_eq!(compute_area(&mesh).unwrap(), 0.0);
    }

    /// Test that a face with collinear corners contributes nothing.
    #[test]
    fn test_collinear_face_contributes_zero() {
        let mesh = MeshSnapshot::from_triangles(
            vec![
                DVec3::new(1.0, 1.0, 1.0),
                DVec3::new(2.0, 2.0, 2.0),
                DVec3::new(3.0, 3.0, 3.0),
            ],
            &[[0, 1, 2]],
        );
        assert_eq!(compute_area(&mesh).unwrap(), 0.0);
        assert_eq!(compute_volume(&mesh).unwrap(), 0.0);
    }

    /// Test that a face repeating an index is accepted.
    ///
    /// A sliver next to a valid box changes nothing.
    #[test]
    fn test_repeated_index_is_not_an_error() {
        let mesh = cuboid(DVec3::new(2.0, 3.0, 4.0));
        let mut faces = mesh.faces().to_vec();
        faces.push(Face::new(vec![0, 0, 1]));
        let with_sliver = MeshSnapshot::new(mesh.vertices().to_vec(), faces);

        let info = compute_mesh_info(&with_sliver).unwrap();
        assert_relative_eq!(info.volume, 24.0, max_relative = 1e-12);
        assert_relative_eq!(info.area, 52.0, max_relative = 1e-12);
    }

    /// Test that a NaN coordinate flows through to both results.
    #[test]
    fn test_nan_propagates() {
        let mesh = MeshSnapshot::from_triangles(
            vec![DVec3::new(f64::NAN, 0.0, 0.0), DVec3::X, DVec3::Y],
            &[[0, 1, 2]],
        );
        let info = compute_mesh_info(&mesh).unwrap();
        assert!(info.volume.is_nan());
        assert!(info.area.is_nan());
        assert!(!info.is_finite());
    }

    // =========================================================================
    // MALFORMED INPUT
    // =========================================================================

    /// Test that every entry point rejects an index past the vertex list.
    #[test]
    fn test_out_of_range_index_rejected() {
        let mesh =
            MeshSnapshot::from_triangles(vec![DVec3::ZERO, DVec3::X, DVec3::Y], &[[0, 1, 3]]);

        let expected = MeshInfoError::index_out_of_range(0, 3, 3);
        assert_eq!(compute_volume(&mesh).unwrap_err(), expected);
        assert_eq!(compute_area(&mesh).unwrap_err(), expected);
        assert_eq!(compute_mesh_info(&mesh).unwrap_err(), expected);
    }

    /// Test that a two-index face is rejected with its position.
    #[test]
    fn test_short_face_rejected() {
        let mesh = MeshSnapshot::new(
            vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            vec![Face::triangle(0, 1, 2), Face::new(vec![1, 2])],
        );
        assert_eq!(
            compute_volume(&mesh).unwrap_err(),
            MeshInfoError::too_few_indices(1, 2)
        );
    }

    // =========================================================================
    // DETERMINISM
    // =========================================================================

    /// Test that measuring the same snapshot twice gives identical bits.
    #[test]
    fn test_repeated_runs_bit_identical() {
        let mesh = quad_grid(40, 3.25).transformed(&DMat4::from_rotation_y(0.3));
        let first = compute_mesh_info(&mesh).unwrap();

        for _ in 0..5 {
            let again = compute_mesh_info(&mesh).unwrap();
            assert_eq!(again.volume.to_bits(), first.volume.to_bits());
            assert_eq!(again.area.to_bits(), first.area.to_bits());
        }
    }

    /// Test that the rayon and sequential paths give identical bits.
    #[test]
    fn test_parallel_matches_sequential_bitwise() {
        let mesh = quad_grid(64, 1.7).transformed(&DMat4::from_rotation_x(0.7));
        let valid = mesh.validate().unwrap();

        let sequential = GeometryKernel::with_config(KernelConfig::sequential()).measure(valid);
        let parallel = GeometryKernel::with_config(KernelConfig::parallel()).measure(valid);

        assert_eq!(parallel.volume.to_bits(), sequential.volume.to_bits());
        assert_eq!(parallel.area.to_bits(), sequential.area.to_bits());
        assert_relative_eq!(sequential.area, 64.0 * 64.0, max_relative = 1e-10);
    }

    /// Test that the kernel sums exactly like one flat `+=` loop over all fan triangles.
    ///
    /// Quads make the fan produce two terms per face, so a per-face grouping
    /// of the sum would round differently.
    #[test]
    fn test_matches_flat_running_total() {
        let mesh = quad_grid(40, 2.5).transformed(&DMat4::from_rotation_z(0.9));

        let mut volume: f64 = 0.0;
        let mut area: f64 = 0.0;
        for face in mesh.faces() {
            for [i, j, k] in face.fan() {
                let a = mesh.vertices()[i as usize];
                let b = mesh.vertices()[j as usize];
                let c = mesh.vertices()[k as usize];
                volume += a.dot(b.cross(c)) / 6.0;
                area += 0.5 * (b - a).cross(c - a).length();
            }
        }

        assert_eq!(compute_volume(&mesh).unwrap().to_bits(), volume.to_bits());
        assert_eq!(compute_area(&mesh).unwrap().to_bits(), area.to_bits());

        let valid = mesh.validate().unwrap();
        let parallel = GeometryKernel::with_config(KernelConfig::parallel()).measure(valid);
        assert_eq!(parallel.volume.to_bits(), volume.to_bits());
        assert_eq!(parallel.area.to_bits(), area.to_bits());
    }

    /// Test that `compute_mesh_info` matches `compute_volume` and `compute_area`.
    ///
    /// The combined and single-value entry points agree exactly.
    #[test]
    fn test_mesh_info_matches_single_values() {
        let mesh = cuboid(DVec3::new(1.25, 7.0, 0.3));
        let info = compute_mesh_info(&mesh).unwrap();

        assert_eq!(info.volume.to_bits(), compute_volume(&mesh).unwrap().to_bits());
        assert_eq!(info.area.to_bits(), compute_area(&mesh).unwrap().to_bits());
    }

    // =========================================================================
    // MESH INFO
    // =========================================================================

    /// Test that `approx_eq` tolerates rounding noise but not real differences.
    #[test]
    fn test_mesh_info_approx_eq() {
        let a = MeshInfo {
            volume: 24.0,
            area: 52.0,
        };
        let b = MeshInfo {
            volume: 24.0 + 1e-12,
            area: 52.0 - 1e-12,
        };
        let c = MeshInfo {
            volume: 24.1,
            area: 52.0,
        };
        assert!(a.approx_eq(&b));
        assert!(!a.approx_eq(&c));
    }
}
