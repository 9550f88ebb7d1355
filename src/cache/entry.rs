//! Cache Entry Module
//!
//! Defines the record kept for each cached file.

use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

// == Cache Entry ==
/// A single cached file.
///
/// The entry's identity is its location on disk; no other metadata is
/// persisted. Recency is implicit: for files admitted during the process
/// lifetime it is the entry's position in the index, for files discovered
/// at startup it is derived from the last-modified timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Location of the cached file
    path: PathBuf,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    // == Accessors ==
    /// The on-disk location of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consumes the entry, returning its location.
    pub fn into_path(self) -> PathBuf {
        self.path
    }

    /// Whether the backing file is currently present on storage.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Last-modified timestamp of the backing file.
    ///
    /// Only consulted while ordering files discovered at startup.
    pub fn modified(&self) -> io::Result<SystemTime> {
        self.path.metadata()?.modified()
    }
}
