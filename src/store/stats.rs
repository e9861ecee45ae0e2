//! Store Statistics Module
//!
//! Tracks in-memory store performance metrics.

use serde::Serialize;

// == Store Stats ==
/// Hit/miss/eviction counters for the bounded in-memory store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Number of successful retrievals
    pub hits: u64,
    /// Number of failed retrievals (absent or expired)
    pub misses: u64,
    /// Number of entries evicted by the capacity policy
    pub evictions: u64,
    /// Number of entries removed by TTL expiry
    pub expirations: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl StoreStats {
    /// Calculates the hit rate: hits / (hits + misses), 0.0 when idle.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_expiration(&mut self) {
        self.expirations += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_idle() {
        assert_eq!(StoreStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = StoreStats::default();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();
        stats.record_expiration();

        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.expirations, 1);
    }
}
