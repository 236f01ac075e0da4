//! Record Store: the in-memory mirror of the last successful fetch.
//!
//! One store per entity kind holds the list collection plus the
//! single "current" slot detail views bind to. There is no merge or
//! dedup logic anywhere: a list fetch replaces the collection
//! wholesale and the last writer wins. A monotonically increasing
//! generation counter stands in for reference identity, letting the
//! selection pipeline memoize without deep comparisons.

use medrev_model::{Medicine, User};

/// Records addressable by a stable string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for User {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Medicine {
    fn key(&self) -> &str {
        &self.metadata_id
    }
}

/// In-memory collection of one entity kind.
#[derive(Debug, Clone, Default)]
pub struct RecordStore<T> {
    records: Vec<T>,
    current: Option<T>,
    generation: u64,
}

impl<T: Keyed> RecordStore<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            current: None,
            generation: 0,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Detail-view slot, populated by a by-key lookup or by a
    /// just-saved update.
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Identity token for memoization; bumped on every write.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Overwrite the collection wholesale (after a list fetch).
    pub fn replace_all(&mut self, records: Vec<T>) {
        self.records = records;
        self.generation += 1;
    }

    /// Drop every record and the current slot (failed list fetch:
    /// fail closed, never show stale data).
    pub fn clear(&mut self) {
        self.records.clear();
        self.current = None;
        self.generation += 1;
    }

    /// Set the single-record slot, so a detail view reflects a
    /// just-saved value without a second round-trip.
    pub fn upsert_current(&mut self, record: T) {
        self.current = Some(record);
        self.generation += 1;
    }

    /// Null the detail slot (dispatched when a detail fetch starts,
    /// so a failed refresh reads "not found" rather than stale).
    pub fn clear_current(&mut self) {
        if self.current.take().is_some() {
            self.generation += 1;
        }
    }

    /// Local-only removal after an acknowledged delete. Trusts the
    /// server's confirmation; no re-fetch.
    pub fn remove_by_key(&mut self, key: &str) {
        self.records.retain(|record| record.key() != key);
        if self.current.as_ref().is_some_and(|c| c.key() == key) {
            self.current = None;
        }
        self.generation += 1;
    }

    /// Find a record in the collection without touching the slot.
    pub fn find(&self, key: &str) -> Option<&T> {
        self.records.iter().find(|record| record.key() == key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
