//! # Mesh Info Cache
//!
//! Remembers the volume and area of the last mesh it measured, keyed by
//! the snapshot fingerprint, so asking again about an unchanged mesh costs
//! one hash pass instead of a full measurement.
//!
//! ## States
//!
//! - **Dirty**: no entry (initial state, or after `invalidate`)
//! - **Clean**: holds the result for the last measured fingerprint
//!
//! A query with a matching fingerprint returns the stored result. Any
//! other fingerprint replaces the entry wholesale. A malformed snapshot
//! is rejected before the entry is looked at, so it never disturbs it.
//!
//! ## Concurrency
//!
//! The whole validate-compare-measure-store sequence runs under one
//! mutex. Concurrent queries with different meshes are last-writer-wins;
//! every caller still gets a result computed from its own snapshot.
//!
//! Measurement under the lock goes through
//! [`MeshMeasure::measure_sequential`], so it never waits on the rayon
//! pool. A query issued from a pool worker would otherwise block a thread
//! the measurement might need.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use mesh_info::{primitives::cuboid, CacheState, MeshInfoCache};
//!
//! let cache = MeshInfoCache::new();
//! let mesh = cuboid(DVec3::new(2.0, 3.0, 4.0));
//!
//! let first = cache.query(&mesh).unwrap();
//! let second = cache.query(&mesh).unwrap();
//! assert_eq!(first, second);
//! assert_eq!(cache.state(), CacheState::Clean);
//! assert_eq!(cache.stats().misses, 1);
//! assert_eq!(cache.stats().hits, 1);
//! ```


use parking_lot::Mutex;
use tracing::debug;

use crate::error::MeshResult;
use crate::fingerprint::Fingerprint;
use crate::kernel::{GeometryKernel, MeshInfo, MeshMeasure};
use crate::snapshot::{MeshSnapshot, Space, ValidatedMesh};

/// Whether the cache currently holds a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// A result for the last measured fingerprint is stored.
    Clean,
    /// Nothing is stored; the next query measures.
    Dirty,
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Queries answered from the stored entry
    pub hits: u64,
    /// Queries that measured the mesh
    pub misses: u64,
    /// Explicit invalidations that discarded an entry
    pub invalidations: u64,
    /// Queries rejected as malformed
    pub rejected: u64,
}

impl CacheStats {
    /// Computes the hit rate (0.0 to 1.0).
    ///
    /// Rejected queries are not counted. Returns 0.0 before any query.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// The single stored result.
#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    fingerprint: Fingerprint,
    info: MeshInfo,
}

#[derive(Debug, Default)]
struct Slot {
    entry: Option<CacheEntry>,
    stats: CacheStats,
}

/// Single-entry measurement cache for one logical mesh.
///
/// Keep one instance per mesh you track and pass it where the mesh is
/// queried. The measure defaults to [`GeometryKernel`].
#[derive(Debug, Default)]
pub struct MeshInfoCache<M = GeometryKernel> {
    measure: M,
    slot: Mutex<Slot>,
}

impl MeshInfoCache<GeometryKernel> {
    /// Creates an empty cache backed by the default kernel.
    pub fn new() -> Self {
        Self::with_measure(GeometryKernel::new())
    }
}

impl<M: MeshMeasure> MeshInfoCache<M> {
    /// Creates an empty cache backed by `measure`.
    pub fn with_measure(measure: M) -> Self {
        Self {
            measure,
            slot: Mutex::new(Slot::default()),
        }
    }

    /// Returns the measure backing this cache.
    pub fn measure(&self) -> &M {
        &self.measure
    }

    /// Volume and area of `snapshot` in its own coordinates.
    ///
    /// # Errors
    ///
    /// [`MeshInfoError::MalformedMesh`](crate::MeshInfoError::MalformedMesh)
    /// if the snapshot fails validation. The stored entry is left as is.
    pub fn query(&self, snapshot: &MeshSnapshot) -> MeshResult<MeshInfo> {
        self.query_in(snapshot, &Space::Object)
    }

    /// Volume and area of `snapshot` measured in `space`.
    ///
    /// The space is part of the fingerprint: switching between object and
    /// world space, or changing the world matrix, remeasures.
    ///
    /// # Errors
    ///
    /// [`MeshInfoError::MalformedMesh`](crate::MeshInfoError::MalformedMesh)
    /// if the snapshot fails validation. The stored entry is left as is.
    pub fn query_in(&self, snapshot: &MeshSnapshot, space: &Space) -> MeshResult<MeshInfo> {
        let mut slot = self.slot.lock();

        let valid = match snapshot.validate() {
            Ok(valid) => valid,
            Err(err) => {
                slot.stats.rejected += 1;
                debug!(error = %err, "rejected malformed mesh");
                return Err(err);
            }
        };

        let fingerprint = Fingerprint::of_in(snapshot, space);

        if let Some(entry) = slot.entry.filter(|e| e.fingerprint == fingerprint) {
            slot.stats.hits += 1;
            debug!(%fingerprint, "mesh unchanged, using cached result");
            return Ok(entry.info);
        }

        debug!(
            %fingerprint,
            vertices = snapshot.vertex_count(),
            faces = snapshot.face_count(),
            "mesh changed, measuring"
        );

        let info = match space.matrix() {
            None => self.measure.measure_sequential(valid),
            Some(matrix) => {
                let world = snapshot.transformed(matrix);
                self.measure
                    .measure_sequential(ValidatedMesh::transformed_from(valid, &world))
            }
        };

        slot.entry = Some(CacheEntry { fingerprint, info });
        slot.stats.misses += 1;

        Ok(info)
    }

    /// Discards the stored result so the next query measures.
    ///
    /// Only needed when a mesh changed in a way its fingerprint cannot
    /// see; a fingerprint mismatch already triggers remeasurement.
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock();
        if slot.entry.take().is_some() {
            slot.stats.invalidations += 1;
            debug!("cache invalidated");
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> CacheState {
        if self.slot.lock().entry.is_some() {
            CacheState::Clean
        } else {
            CacheState::Dirty
        }
    }

    /// Returns the stored result, if any.
    pub fn cached(&self) -> Option<MeshInfo> {
        self.slot.lock().entry.map(|entry| entry.info)
    }

    /// Returns the fingerprint of the stored result, if any.
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.slot.lock().entry.map(|entry| entry.fingerprint)
    }

    /// Returns a copy of the statistics.
    pub fn stats(&self) -> CacheStats {
        self.slot.lock().stats
    }
}
