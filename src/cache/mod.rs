//! Cache Module
//!
//! Provides a bounded on-disk cache with least-recently-added eviction.

mod entry;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use recency::RecencyIndex;
pub use stats::CacheStats;
pub use store::BoundedFileCache;

// == Public Constants ==
/// Size of the intermediate buffer used when streaming a source into the
/// cache
pub const COPY_BUFFER_SIZE: usize = 8 * 1024;
