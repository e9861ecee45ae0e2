//! Recency List Module
//!
//! Tracks key access order for least-recently-used eviction.

use std::collections::VecDeque;

// == Recency List ==
/// Access-order tracker backing the bounded store's eviction policy.
///
/// Front = most recently used, back = least recently used. The informal
/// name "LRU" is accurate here: eviction picks the genuinely
/// least-recently-used key, and reads refresh recency.
#[derive(Debug, Default)]
pub struct RecencyList {
    order: VecDeque<String>,
}

impl RecencyList {
    /// Creates an empty recency list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as just used, moving it to the front.
    pub fn record_use(&mut self, key: &str) {
        self.forget(key);
        self.order.push_front(key.to_string());
    }

    /// Drops a key from the list; no-op if it was never tracked.
    pub fn forget(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    /// Removes and returns the least recently used key, if any.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }
}
