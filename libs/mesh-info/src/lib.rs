//! # Mesh Info
//!
//! Volume and surface area of polygon meshes, with a fingerprinted cache
//! that only remeasures when the mesh actually changed.
//!
//! ## Architecture
//!
//! ```text
//! host mesh → MeshSnapshot → MeshInfoCache (fingerprint match?) → MeshInfo
//!                                   ↓ no
//!                             GeometryKernel
//! ```
//!
//! - **snapshot**: immutable vertices and faces, validated once per query
//! - **kernel**: pure volume/area computation over fan-triangulated faces
//! - **fingerprint**: content hash used to detect changes
//! - **cache**: single-entry, mutex-guarded result cache
//! - **settings**: kernel tuning on top of the workspace `config` constants
//!
//! The host decides how snapshots are built from its own mesh type and
//! owns one cache per mesh it tracks.
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use mesh_info::{compute_volume, primitives::cuboid, MeshInfoCache};
//!
//! let mesh = cuboid(DVec3::new(2.0, 3.0, 4.0));
//!
//! // One-off volume
//! let volume = compute_volume(&mesh)?;
//! assert!((volume - 24.0).abs() < 1e-12);
//!
//! // Repeated queries against a mesh that may or may not change
//! let cache = MeshInfoCache::new();
//! let info = cache.query(&mesh)?;
//! assert!((info.area - 52.0).abs() < 1e-12);
//! # Ok::<(), mesh_info::MeshInfoError>(())
//! ```

pub mod cache;
pub mod error;
pub mod fingerprint;
pub mod kernel;
pub mod primitives;
pub mod settings;
pub mod snapshot;

pub use cache::{CacheState, CacheStats, MeshInfoCache};
pub use error::{MalformedReason, MeshInfoError, MeshResult};
pub use fingerprint::Fingerprint;
pub use kernel::{
    compute_area, compute_mesh_info, compute_volume, GeometryKernel, MeshInfo, MeshMeasure,
};
pub use settings::KernelConfig;
pub use snapshot::{Face, MeshSnapshot, Space, ValidatedMesh, Vertex};
