//! Configuration Module
//!
//! Holds the construction-time options for a cache instance.

use std::path::{Path, PathBuf};

/// Construction options for a [`crate::BoundedFileCache`].
///
/// All three values are supplied by the caller; there are no environment
/// fallbacks. The only defaulting rule is the capacity clamp: a requested
/// capacity of 0 is silently coerced to 1.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Base directory under which the cache subdirectory is created
    pub storage_root: PathBuf,
    /// Relative subdirectory name, isolates this cache from others sharing
    /// the root
    pub dir_name: String,
    /// Capacity bound, clamped to >= 1
    pub max_entries: usize,
}

impl CacheConfig {
    /// Creates a new configuration.
    ///
    /// # Arguments
    /// * `storage_root` - base directory for the cache subdirectory
    /// * `dir_name` - name of the cache subdirectory
    /// * `max_entries` - maximum number of cached files (clamped to >= 1)
    pub fn new(
        storage_root: impl Into<PathBuf>,
        dir_name: impl Into<String>,
        max_entries: usize,
    ) -> Self {
        Self {
            storage_root: storage_root.into(),
            dir_name: dir_name.into(),
            max_entries,
        }
    }

    /// Effective capacity: `max_entries` clamped to a minimum of 1.
    ///
    /// A cache of capacity 0 is disallowed; the value is coerced rather
    /// than rejected.
    pub fn capacity(&self) -> usize {
        self.max_entries.max(1)
    }

    /// Resolves the cache directory as `storage_root/dir_name`.
    ///
    /// The directory is not created here; creation is deferred to the
    /// first admission.
    pub fn cache_dir(&self) -> PathBuf {
        self.storage_root.join(&self.dir_name)
    }

    /// The storage root this cache lives under.
    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }
}
