//! # Geometry Kernel
//!
//! Volume and surface area of a polygon mesh.
//!
//! ## Algorithms
//!
//! Every face is fanned around its first vertex. For each fan triangle
//! `(a, b, c)`:
//!
//! - **Volume**: signed tetrahedron volume against the origin,
//!   `dot(a, cross(b, c)) / 6`. Summed over a closed, outward-wound mesh
//!   this is the enclosed volume (divergence theorem); reversed winding
//!   gives the negated value.
//! - **Area**: `|cross(b - a, c - a)| / 2`, unsigned.
//!
//! The signed volume is returned unmodified. Closedness and consistent
//! winding are not checked; callers that need a non-negative volume take
//! [`MeshInfo::unsigned_volume`] at their boundary.
//!
//! ## Determinism
//!
//! Triangle terms go into one running total starting from `+0.0`, faces
//! in snapshot order and fan triangles in index order, exactly like a
//! plain `total += term` loop. The parallel path evaluates the same terms
//! on the rayon pool, collects them in that order and sums them on the
//! calling thread, so both paths give bit-identical results.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use mesh_info::{compute_area, compute_volume, primitives::cuboid};
//!
//! let mesh = cuboid(DVec3::new(2.0, 3.0, 4.0));
//! assert!((compute_volume(&mesh).unwrap() - 24.0).abs() < 1e-12);
//! assert!((compute_area(&mesh).unwrap() - 52.0).abs() < 1e-12);
//! ```

mod tests;

use config::constants::EPSILON;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::MeshResult;
use crate::settings::KernelConfig;
use crate::snapshot::{MeshSnapshot, ValidatedMesh, Vertex};

// =============================================================================
// MESH INFO
// =============================================================================

/// Volume and total surface area of one snapshot.
///
/// Always recomputed as a whole; never patched in place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshInfo {
    /// Signed enclosed volume (positive for outward winding)
    pub volume: f64,
    /// Sum of all face areas (never negative)
    pub area: f64,
}

impl MeshInfo {
    /// Zero volume, zero area.
    pub const ZERO: Self = Self {
        volume: 0.0,
        area: 0.0,
    };

    /// Returns the volume without its winding sign.
    #[inline]
    pub fn unsigned_volume(&self) -> f64 {
        self.volume.abs()
    }

    /// Returns true if neither value is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.volume.is_finite() && self.area.is_finite()
    }

    /// Compares both values within [`EPSILON`] relative tolerance.
    pub fn approx_eq(&self, other: &Self) -> bool {
        fn close(a: f64, b: f64) -> bool {
            (a - b).abs() <= EPSILON * a.abs().max(b.abs()).max(1.0)
        }
        close(self.volume, other.volume) && close(self.area, other.area)
    }
}

// =============================================================================
// MEASURE TRAIT
// =============================================================================

/// Something that turns a validated mesh into its volume and area.
///
/// The cache is generic over this so alternative or instrumented kernels
/// can be plugged in.
pub trait MeshMeasure {
    /// Measures a mesh that already passed validation.
    fn measure(&self, mesh: ValidatedMesh<'_>) -> MeshInfo;

    /// Measures without handing work to the rayon pool.
    ///
    /// The cache calls this while holding its lock: a pool worker blocked
    /// on that lock could otherwise be the one the measurement waits for.
    /// Must return the same result as [`MeshMeasure::measure`].
    fn measure_sequential(&self, mesh: ValidatedMesh<'_>) -> MeshInfo {
        self.measure(mesh)
    }
}

// =============================================================================
// GEOMETRY KERNEL
// =============================================================================

/// Stateless volume and area computation.
///
/// Holds only its configuration, so one instance can be shared freely
/// between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryKernel {
    config: KernelConfig,
}

impl GeometryKernel {
    /// Creates a kernel with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a kernel with an explicit configuration.
    pub fn with_config(config: KernelConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Signed volume of a validated mesh.
    pub fn volume(&self, mesh: ValidatedMesh<'_>) -> f64 {
        self.accumulate(mesh, triangle_volume)
    }

    /// Total surface area of a validated mesh.
    pub fn area(&self, mesh: ValidatedMesh<'_>) -> f64 {
        self.accumulate(mesh, triangle_area)
    }

    /// Sums one term per fan triangle, in face then fan order.
    fn accumulate<F>(&self, mesh: ValidatedMesh<'_>, term: F) -> f64
    where
        F: Fn([Vertex; 3]) -> f64 + Sync,
    {
        let faces = mesh.faces();
        let per_triangle = |tri: [u32; 3]| term(mesh.corners(tri));

        if self.config.is_parallel(faces.len()) {
            trace!(faces = faces.len(), "measuring faces on rayon pool");
            let terms: Vec<f64> = faces
                .par_iter()
                .flat_map_iter(|face| face.fan().map(&per_triangle))
                .collect();
            sum_in_order(terms)
        } else {
            sum_in_order(faces.iter().flat_map(|face| face.fan()).map(per_triangle))
        }
    }
}

impl MeshMeasure for GeometryKernel {
    fn measure(&self, mesh: ValidatedMesh<'_>) -> MeshInfo {
        let info = MeshInfo {
            volume: self.volume(mesh),
            area: self.area(mesh),
        };

        if !info.is_finite() {
            warn!(
                volume = info.volume,
                area = info.area,
                "mesh measured to a non-finite value"
            );
        }

        info
    }

    fn measure_sequential(&self, mesh: ValidatedMesh<'_>) -> MeshInfo {
        GeometryKernel::with_config(KernelConfig::sequential()).measure(mesh)
    }
}

// =============================================================================
// FREE FUNCTIONS
// =============================================================================

/// Signed volume of a snapshot.
///
/// # Errors
///
/// [`MeshInfoError::MalformedMesh`](crate::MeshInfoError::MalformedMesh)
/// if a face is too short or references a missing vertex.
pub fn compute_volume(snapshot: &MeshSnapshot) -> MeshResult<f64> {
    let mesh = snapshot.validate()?;
    Ok(GeometryKernel::new().volume(mesh))
}

/// Total surface area of a snapshot.
///
/// # Errors
///
/// [`MeshInfoError::MalformedMesh`](crate::MeshInfoError::MalformedMesh)
/// if a face is too short or references a missing vertex.
pub fn compute_area(snapshot: &MeshSnapshot) -> MeshResult<f64> {
    let mesh = snapshot.validate()?;
    Ok(GeometryKernel::new().area(mesh))
}

/// Volume and area of a snapshot, validated once.
///
/// # Errors
///
/// [`MeshInfoError::MalformedMesh`](crate::MeshInfoError::MalformedMesh)
/// if a face is too short or references a missing vertex.
pub fn compute_mesh_info(snapshot: &MeshSnapshot) -> MeshResult<MeshInfo> {
    let mesh = snapshot.validate()?;
    Ok(GeometryKernel::new().measure(mesh))
}

// =============================================================================
// PER-TRIANGLE TERMS
// =============================================================================

fn triangle_volume([a, b, c]: [Vertex; 3]) -> f64 {
    a.dot(b.cross(c)) / 6.0
}

fn triangle_area([a, b, c]: [Vertex; 3]) -> f64 {
    0.5 * (b - a).cross(c - a).length()
}

/// Left-to-right sum from `+0.0`.
#[inline]
fn sum_in_order(values: impl IntoIterator<Item = f64>) -> f64 {
    values.into_iter().fold(0.0, |acc, value| acc + value)
}
