//! Runtime settings for the geometry kernel
//!
//! Wraps the workspace constants into a value that can be tuned per
//! kernel instance.

use config::constants::PARALLEL_FACE_THRESHOLD;

/// Kernel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Face count at which faces are measured on the rayon pool
    pub parallel_threshold: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: PARALLEL_FACE_THRESHOLD,
        }
    }
}

impl KernelConfig {
    /// Never leaves the calling thread
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    /// Always measures on the rayon pool, whatever the mesh size
    pub fn parallel() -> Self {
        Self {
            parallel_threshold: 0,
        }
    }

    /// Returns true if a mesh with `face_count` faces goes parallel
    #[inline]
    pub fn is_parallel(&self, face_count: usize) -> bool {
        face_count >= self.parallel_threshold
    }
}
