//! Contents Cache - a bounded on-disk cache for opaque content sources
//!
//! Copies stream-only content sources into randomly-named local files and
//! evicts the least-recently-added file once capacity is exceeded.

pub mod cache;
pub mod config;
pub mod error;
pub mod resolver;

pub use cache::{BoundedFileCache, CacheEntry, CacheStats, RecencyIndex};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use resolver::{ContentResolver, MemoryResolver, ResolveError, SourceUri};
