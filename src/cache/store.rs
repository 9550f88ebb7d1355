//! Cache Store Module
//!
//! The bounded file cache: startup recovery, admission, and eviction.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::{CacheEntry, CacheStats, RecencyIndex, COPY_BUFFER_SIZE};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::resolver::{ContentResolver, ResolveError, SourceUri};

// == Bounded File Cache ==
/// A bounded on-disk cache for opaque content sources.
///
/// Each admitted source is copied into a randomly-named file under the
/// cache directory. Once the number of cached files exceeds the configured
/// capacity, the least-recently-added file is deleted. Files already
/// present in the directory at construction time are folded back into the
/// index, ordered by their last-modified timestamps.
///
/// Index mutation is serialized behind a single mutex, so `admit` may be
/// called from multiple threads; the streaming copy itself runs outside
/// the lock. Dropping the cache leaves all cached files on storage.
pub struct BoundedFileCache<R: ContentResolver> {
    /// Cache directory, created lazily on first admission
    cache_dir: PathBuf,
    /// Maximum number of cached files, >= 1
    capacity: usize,
    /// Injected capability that opens sources as byte streams
    resolver: R,
    /// Index and counters, guarded together
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    index: RecencyIndex,
    stats: CacheStats,
}

impl<R: ContentResolver> BoundedFileCache<R> {
    // == Constructor ==
    /// Creates a cache rooted at `config.cache_dir()` and recovers any
    /// files already present there.
    ///
    /// A missing or empty cache directory is not an error. If more files
    /// exist than capacity allows, the excess oldest files are deleted
    /// immediately.
    pub fn new(config: CacheConfig, resolver: R) -> Self {
        let cache = Self {
            cache_dir: config.cache_dir(),
            capacity: config.capacity(),
            resolver,
            inner: Mutex::new(Inner {
                index: RecencyIndex::new(),
                stats: CacheStats::new(),
            }),
        };
        cache.recover_existing();
        cache
    }

    // == Admit ==
    /// Copies the source's bytes into a new cache-owned file and registers
    /// it as the most recently admitted entry, evicting from the tail if
    /// capacity is exceeded.
    ///
    /// Returns the location of the new file. The file is fully written and
    /// closed, and remains on disk until a later admission evicts it.
    ///
    /// # Errors
    /// - [`CacheError::InvalidSource`] if the resolver does not recognize
    ///   the source kind; raised before any I/O.
    /// - [`CacheError::SourceUnavailable`] if the resolver cannot open the
    ///   source; no filesystem writes have occurred.
    /// - [`CacheError::Storage`] if the cache directory cannot be created
    ///   or the destination file cannot be written. A failed copy may
    ///   leave a partial file behind; it is never indexed and never
    ///   cleaned up.
    ///
    /// On any error the index is left unchanged.
    pub fn admit(&self, source: &SourceUri) -> Result<PathBuf> {
        if !self.resolver.recognizes(source) {
            return Err(CacheError::InvalidSource(source.to_string()));
        }

        fs::create_dir_all(&self.cache_dir).map_err(|err| {
            CacheError::storage(
                format!("failed to create cache dir {}", self.cache_dir.display()),
                err,
            )
        })?;

        let stream = self.resolver.open_stream(source).map_err(|err| match err {
            ResolveError::NotFound(uri) => CacheError::SourceUnavailable(uri),
            ResolveError::Io(cause) => {
                CacheError::SourceUnavailable(format!("{source}: {cause}"))
            }
        })?;

        let path = self.cache_dir.join(fresh_name());
        spool(stream, &path)?;

        let mut inner = self.inner.lock();
        inner.stats.record_admission();
        self.register(&mut inner, CacheEntry::new(&path));
        let tracked = inner.index.len();
        inner.stats.set_total_entries(tracked);
        drop(inner);

        debug!(%source, path = %path.display(), "Admitted source into cache");
        Ok(path)
    }

    // == Accessors ==
    /// Current number of tracked entries.
    pub fn len(&self) -> usize {
        self.inner.lock().index.len()
    }

    /// Returns true if no entries are tracked.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().index.is_empty()
    }

    /// The capacity bound (clamped to >= 1 at construction).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The directory owned by this cache.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Location of the next eviction candidate, if any.
    pub fn oldest(&self) -> Option<PathBuf> {
        self.inner
            .lock()
            .index
            .peek_oldest()
            .map(|entry| entry.path().to_path_buf())
    }

    /// Snapshot of the lifecycle counters.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.index.len());
        stats
    }

    // == Recovery ==
    /// Folds files already present in the cache directory into the index,
    /// oldest first, applying the same insertion discipline as admission.
    fn recover_existing(&self) {
        let mut files = scan_cache_dir(&self.cache_dir);
        files.sort_by_key(|(_, modified)| *modified);

        let mut inner = self.inner.lock();
        for (entry, _) in files {
            debug!(path = %entry.path().display(), "Recovered cached file");
            inner.stats.record_recovered();
            self.register(&mut inner, entry);
        }
        let tracked = inner.index.len();
        inner.stats.set_total_entries(tracked);
    }

    // == Register ==
    /// Front-inserts an entry, then evicts from the tail while the index
    /// exceeds capacity. Eviction deletes the backing file; a failed
    /// delete is logged and the index entry is removed regardless.
    fn register(&self, inner: &mut Inner, entry: CacheEntry) {
        inner.index.insert(entry);

        while inner.index.len() > self.capacity {
            let Some(evicted) = inner.index.evict_oldest() else {
                break;
            };
            inner.stats.record_eviction();
            match fs::remove_file(evicted.path()) {
                Ok(()) => {
                    debug!(path = %evicted.path().display(), "Cached file deleted");
                }
                Err(err) => {
                    inner.stats.record_delete_failure();
                    warn!(
                        path = %evicted.path().display(),
                        error = %err,
                        "Failed to delete evicted cache file"
                    );
                }
            }
        }
    }
}

// == Streaming Copy ==
/// Streams all bytes from `stream` into a new file at `path` through a
/// fixed-size buffer.
///
/// On failure the partially written destination is left behind untracked.
/// Both streams are released on every exit path; release failures never
/// mask the primary error.
fn spool(mut stream: Box<dyn Read + Send>, path: &Path) -> Result<()> {
    let mut dest = File::create(path).map_err(|err| {
        CacheError::storage(
            format!("failed to create cache file {}", path.display()),
            err,
        )
    })?;

    let mut buf = [0u8; COPY_BUFFER_SIZE];
    loop {
        let read = match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) => {
                return Err(CacheError::storage(
                    format!("failed to read source while filling {}", path.display()),
                    err,
                ));
            }
        };
        dest.write_all(&buf[..read]).map_err(|err| {
            CacheError::storage(
                format!("failed to write cache file {}", path.display()),
                err,
            )
        })?;
    }

    // The bytes are all handed to the OS at this point; pushing them to
    // the device is best-effort, like the close itself.
    if let Err(err) = dest.sync_all() {
        warn!(path = %path.display(), error = %err, "Failed to sync cache file");
    }
    Ok(())
}

// == File Naming ==
/// A fresh, globally-unique file name: a 128-bit random token rendered as
/// text. Collision probability is negligible.
fn fresh_name() -> String {
    Uuid::new_v4().to_string()
}

// == Directory Scan ==
/// Lists the regular files currently in the cache directory together with
/// their last-modified timestamps. A missing directory yields an empty
/// set. Metadata failures rank the file as oldest.
fn scan_cache_dir(dir: &Path) -> Vec<(CacheEntry, SystemTime)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut files = Vec::new();
    for dir_entry in entries.flatten() {
        let path = dir_entry.path();
        if !path.is_file() {
            continue;
        }
        let entry = CacheEntry::new(path);
        let modified = entry.modified().unwrap_or(UNIX_EPOCH);
        files.push((entry, modified));
    }
    files
}
