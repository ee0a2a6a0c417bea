//! Search history — recently searched phrases, newest first.
//!
//! Every non-empty phrase that triggers a rebuild is recorded. Recording the
//! phrase already at the head is a no-op, so retyping or re-running the same
//! search does not flood the list. Older duplicates further down are kept:
//! the list is a log of what was searched, not a set.

use std::collections::VecDeque;

/// Default number of phrases kept.
pub const HISTORY_MAX: usize = 10;

/// Bounded most-recent-first list of search phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchHistory {
    /// Create an empty history holding up to [`HISTORY_MAX`] phrases.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_MAX)
    }

    /// Create an empty history holding up to `capacity` phrases (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record `phrase` as the most recent search.
    ///
    /// Empty phrases and a repeat of the current head are ignored. Returns
    /// whether the list changed.
    pub fn record(&mut self, phrase: &str) -> bool {
        if phrase.is_empty() || self.entries.front().is_some_and(|head| head == phrase) {
            return false;
        }

        self.entries.push_front(phrase.to_owned());
        self.entries.truncate(self.capacity);
        true
    }

    /// Phrase at `index` (0 = newest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Every phrase, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    /// Snapshot of every phrase, newest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// Maximum number of phrases kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, dropping the oldest phrases if it shrinks.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.entries.truncate(self.capacity);
    }

    /// Number of phrases recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn newest_first() {
        let mut h = SearchHistory::new();
        h.record("one");
        h.record("two");
        h.record("three");
        assert_eq!(h.to_vec(), vec!["three", "two", "one"]);
        assert_eq!(h.get(0), Some("three"));
    }

    #[test]
    fn repeat_of_head_is_ignored() {
        let mut h = SearchHistory::new();
        assert!(h.record("foo"));
        assert!(!h.record("foo"));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn older_duplicate_is_kept() {
        let mut h = SearchHistory::new();
        h.record("foo");
        h.record("bar");
        h.record("foo");
        assert_eq!(h.to_vec(), vec!["foo", "bar", "foo"]);
    }

    #[test]
    fn empty_phrase_is_ignored() {
        let mut h = SearchHistory::new();
        assert!(!h.record(""));
        assert!(h.is_empty());
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut h = SearchHistory::new();
        for i in 0..15 {
            h.record(&format!("p{i}"));
        }
        assert_eq!(h.len(), HISTORY_MAX);
        assert_eq!(h.get(0), Some("p14"));
        assert_eq!(h.get(HISTORY_MAX - 1), Some("p5"));
        assert_eq!(h.get(HISTORY_MAX), None);
    }

    #[test]
    fn shrinking_capacity_truncates() {
        let mut h = SearchHistory::with_capacity(5);
        for p in ["a", "b", "c", "d"] {
            h.record(p);
        }
        h.set_capacity(2);
        assert_eq!(h.to_vec(), vec!["d", "c"]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut h = SearchHistory::with_capacity(0);
        h.record("a");
        h.record("b");
        assert_eq!(h.capacity(), 1);
        assert_eq!(h.to_vec(), vec!["b"]);
    }
}
