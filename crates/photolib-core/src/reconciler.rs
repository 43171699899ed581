//! Library state reconciliation
//!
//! `LibraryState` owns the ordered in-memory view of the catalog and is
//! mutated only through three transitions: `seed`, `merge_uploads`, and
//! `remove`. Each transition derives the next state from the current one,
//! and the facade serializes them behind a single lock, so no transition
//! ever observes a partially applied prior transition.
//!
//! Ordering rules:
//! - `seed` sorts by `last_modified` descending (stable, so ties keep the
//!   listing order).
//! - `merge_uploads` prepends the whole batch ahead of everything already
//!   present, regardless of timestamps. Just-uploaded content surfaces
//!   first without a second round-trip to re-sort by server-assigned
//!   timestamps.
//!
//! Invariant: no two entries ever share a key.

use std::collections::HashSet;

use crate::models::CatalogEntry;

/// Ordered, deduplicated collection of catalog entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryState {
    entries: Vec<CatalogEntry>,
}

impl LibraryState {
    /// Create an empty library state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current entries, newest-first
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Whether an entry with the given key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the collection wholesale with a freshly listed catalog
    ///
    /// Sorts by `last_modified` descending; the sort is stable so entries
    /// with equal timestamps keep their original listing order. This is
    /// the only transition allowed to replace the collection.
    pub fn seed(&mut self, mut entries: Vec<CatalogEntry>) {
        entries.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
        self.entries = dedup_by_key(entries);
    }

    /// Merge a batch of successfully uploaded entries
    ///
    /// Candidates whose key is already present are dropped silently; the
    /// rest are prepended in batch-relative order. A final dedup pass
    /// collapses collisions introduced by concurrent batches, keeping the
    /// first occurrence in merged (new-then-old) order.
    ///
    /// Returns the number of entries actually merged.
    pub fn merge_uploads(&mut self, batch: Vec<CatalogEntry>) -> usize {
        let additions: Vec<CatalogEntry> = batch
            .into_iter()
            .filter(|candidate| !self.contains_key(&candidate.key))
            .collect();
        let merged = additions.len();

        let mut next = additions;
        next.extend(self.entries.drain(..));
        self.entries = dedup_by_key(next);

        merged
    }

    /// Remove the entry with the given key, if present
    ///
    /// Idempotent: removing an absent key is a no-op, not an error.
    /// Returns whether an entry was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        self.entries.len() != before
    }
}

/// Keep the first occurrence of each key, preserving order
fn dedup_by_key(entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.key.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn entry(key: &str, at: DateTime<Utc>) -> CatalogEntry {
        CatalogEntry::new(key, at)
    }

    fn keys(state: &LibraryState) -> Vec<&str> {
        state.entries().iter().map(|e| e.key.as_str()).collect()
    }

    #[test]
    fn test_seed_sorts_newest_first() {
        let t1 = Utc::now();
        let t2 = t1 + Duration::seconds(10);

        let mut state = LibraryState::new();
        state.seed(vec![entry("people/x.jpg", t1), entry("people/y.jpg", t2)]);

        assert_eq!(keys(&state), vec!["people/y.jpg", "people/x.jpg"]);
    }

    #[test]
    fn test_seed_is_stable_for_equal_timestamps() {
        let t = Utc::now();
        let mut state = LibraryState::new();
        state.seed(vec![
            entry("people/a.jpg", t),
            entry("people/b.jpg", t),
            entry("people/c.jpg", t),
        ]);

        assert_eq!(
            keys(&state),
            vec!["people/a.jpg", "people/b.jpg", "people/c.jpg"]
        );
    }

    #[test]
    fn test_seed_replaces_previous_state() {
        let t = Utc::now();
        let mut state = LibraryState::new();
        state.seed(vec![entry("people/old.jpg", t)]);
        state.seed(vec![entry("people/new.jpg", t)]);

        assert_eq!(keys(&state), vec!["people/new.jpg"]);
    }

    #[test]
    fn test_merge_prepends_new_entries() {
        let t1 = Utc::now();
        let t2 = t1 + Duration::seconds(10);

        let mut state = LibraryState::new();
        state.seed(vec![entry("people/x.jpg", t1), entry("people/y.jpg", t2)]);

        let merged = state.merge_uploads(vec![entry("people/z.jpg", t1)]);

        assert_eq!(merged, 1);
        assert_eq!(
            keys(&state),
            vec!["people/z.jpg", "people/y.jpg", "people/x.jpg"]
        );
    }

    #[test]
    fn test_merge_prepends_even_older_timestamps() {
        let t1 = Utc::now();
        let older = t1 - Duration::days(30);

        let mut state = LibraryState::new();
        state.seed(vec![entry("people/x.jpg", t1)]);
        state.merge_uploads(vec![entry("people/archive.jpg", older)]);

        // Batch placement ignores timestamps on purpose.
        assert_eq!(keys(&state), vec!["people/archive.jpg", "people/x.jpg"]);
    }

    #[test]
    fn test_merge_skips_existing_keys_silently() {
        let t = Utc::now();
        let mut state = LibraryState::new();
        state.seed(vec![entry("people/x.jpg", t)]);

        let merged = state.merge_uploads(vec![
            entry("people/x.jpg", t + Duration::seconds(5)),
            entry("people/new.jpg", t),
        ]);

        assert_eq!(merged, 1);
        assert_eq!(keys(&state), vec!["people/new.jpg", "people/x.jpg"]);
        // The existing entry keeps its original timestamp.
        assert_eq!(state.entries()[1].last_modified, t);
    }

    #[test]
    fn test_merge_preserves_batch_relative_order() {
        let t = Utc::now();
        let mut state = LibraryState::new();
        state.seed(vec![entry("people/x.jpg", t)]);

        state.merge_uploads(vec![
            entry("people/a.jpg", t),
            entry("people/b.jpg", t),
            entry("people/c.jpg", t),
        ]);

        assert_eq!(
            keys(&state),
            vec!["people/a.jpg", "people/b.jpg", "people/c.jpg", "people/x.jpg"]
        );
    }

    #[test]
    fn test_merge_collapses_duplicates_within_batch() {
        let t = Utc::now();
        let mut state = LibraryState::new();

        state.merge_uploads(vec![
            entry("people/a.jpg", t),
            entry("people/a.jpg", t + Duration::seconds(1)),
            entry("people/b.jpg", t),
        ]);

        assert_eq!(keys(&state), vec!["people/a.jpg", "people/b.jpg"]);
    }

    #[test]
    fn test_remove_existing_key() {
        let t = Utc::now();
        let mut state = LibraryState::new();
        state.seed(vec![
            entry("people/z.jpg", t + Duration::seconds(2)),
            entry("people/y.jpg", t + Duration::seconds(1)),
            entry("people/x.jpg", t),
        ]);

        assert!(state.remove("people/y.jpg"));
        assert_eq!(keys(&state), vec!["people/z.jpg", "people/x.jpg"]);
        assert!(!state.contains_key("people/y.jpg"));
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let t = Utc::now();
        let mut state = LibraryState::new();
        state.seed(vec![entry("people/x.jpg", t)]);
        let snapshot = state.clone();

        assert!(!state.remove("people/ghost.jpg"));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_uniqueness_holds_across_transition_sequences() {
        let t = Utc::now();
        let mut state = LibraryState::new();

        state.seed(vec![entry("people/a.jpg", t), entry("people/b.jpg", t)]);
        state.merge_uploads(vec![entry("people/b.jpg", t), entry("people/c.jpg", t)]);
        state.remove("people/a.jpg");
        state.merge_uploads(vec![entry("people/a.jpg", t), entry("people/c.jpg", t)]);
        state.remove("people/missing.jpg");

        let mut seen = std::collections::HashSet::new();
        for e in state.entries() {
            assert!(seen.insert(&e.key), "duplicate key: {}", e.key);
        }
        assert_eq!(state.len(), 3);
    }
}
