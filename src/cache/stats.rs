//! Cache Statistics Module
//!
//! Tracks cache lifecycle counters: admissions, evictions, recovered files.

use serde::Serialize;

// == Cache Stats ==
/// Lifecycle counters for a cache instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful admissions
    pub admissions: u64,
    /// Number of entries evicted by capacity
    pub evictions: u64,
    /// Number of pre-existing files folded into the index at construction
    pub recovered: u64,
    /// Number of eviction deletes that failed (the index entry was removed
    /// regardless, leaving an orphaned file)
    pub delete_failures: u64,
    /// Current number of entries in the index
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Admission ==
    /// Increments the admission counter.
    pub fn record_admission(&mut self) {
        self.admissions += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Recovered ==
    /// Increments the recovered-file counter.
    pub fn record_recovered(&mut self) {
        self.recovered += 1;
    }

    // == Record Delete Failure ==
    /// Increments the failed-delete counter.
    pub fn record_delete_failure(&mut self) {
        self.delete_failures += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.admissions, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.recovered, 0);
        assert_eq!(stats.delete_failures, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_stats_counters() {
        let mut stats = CacheStats::new();

        stats.record_admission();
        stats.record_admission();
        stats.record_eviction();
        stats.record_recovered();
        stats.record_delete_failure();
        stats.set_total_entries(2);

        assert_eq!(stats.admissions, 2);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.recovered, 1);
        assert_eq!(stats.delete_failures, 1);
        assert_eq!(stats.total_entries, 2);
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = CacheStats::new();
        stats.record_admission();
        stats.set_total_entries(1);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["admissions"], 1);
        assert_eq!(json["total_entries"], 1);
    }
}
