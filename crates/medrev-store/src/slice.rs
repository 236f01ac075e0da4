//! Per-entity-kind state slice: store plus tracker, driven by a pure
//! reducer.
//!
//! Every state transition the async layer can cause is an [`Action`];
//! [`EntitySlice::apply`] is the single place they mutate state. That
//! keeps the failure semantics in one auditable spot: a failed list
//! fetch clears the collection (fail closed), a failed write leaves
//! records untouched and only surfaces the message.

use tracing::debug;

use crate::store::{Keyed, RecordStore};
use crate::tracker::{FetchPhase, Tracker};

/// State transition for one entity kind.
#[derive(Debug, Clone)]
pub enum Action<T> {
    /// List fetch dispatched.
    FetchStarted,
    /// List fetch resolved; replaces the collection wholesale.
    FetchSucceeded(Vec<T>),
    /// List fetch failed; collection is cleared, message recorded.
    FetchFailed(String),
    /// Detail lookup dispatched; nulls the current slot immediately.
    DetailStarted,
    /// Detail lookup resolved.
    DetailSucceeded(T),
    /// Detail lookup failed (including not-found).
    DetailFailed(String),
    /// A write (create/update/delete/status change) went in flight.
    WriteStarted,
    /// The write resolved successfully. An optional fresh record
    /// lands in the current slot (post-update server echo).
    WriteSucceeded(Option<T>),
    /// The write failed; records stay untouched.
    WriteFailed(String),
    /// Acknowledged delete: local removal, no re-fetch.
    Removed(String),
    /// View unmount: reset phase to idle so stale errors don't
    /// survive re-entry.
    Cleared,
}

/// Store + tracker for one entity kind.
#[derive(Debug, Clone, Default)]
pub struct EntitySlice<T> {
    pub store: RecordStore<T>,
    pub tracker: Tracker,
}

impl<T: Keyed> EntitySlice<T> {
    pub fn new() -> Self {
        Self {
            store: RecordStore::new(),
            tracker: Tracker::new(),
        }
    }

    /// Apply one action. This is the only mutation path.
    pub fn apply(&mut self, action: Action<T>) {
        match action {
            Action::FetchStarted => {
                self.tracker.start_fetch();
            }
            Action::FetchSucceeded(records) => {
                debug!(count = records.len(), "list fetch succeeded");
                self.store.replace_all(records);
                self.tracker.finish_fetch_ok();
            }
            Action::FetchFailed(message) => {
                debug!(%message, "list fetch failed");
                self.store.clear();
                self.tracker.finish_fetch_err(message);
            }
            Action::DetailStarted => {
                self.store.clear_current();
                self.tracker.start_fetch();
            }
            Action::DetailSucceeded(record) => {
                self.store.upsert_current(record);
                self.tracker.finish_fetch_ok();
            }
            Action::DetailFailed(message) => {
                debug!(%message, "detail fetch failed");
                self.tracker.finish_fetch_err(message);
            }
            Action::WriteStarted => {
                self.tracker.start_write();
            }
            Action::WriteSucceeded(record) => {
                if let Some(record) = record {
                    self.store.upsert_current(record);
                }
                self.tracker.finish_write();
                self.tracker.finish_fetch_ok();
            }
            Action::WriteFailed(message) => {
                self.tracker.finish_write();
                self.tracker.finish_fetch_err(message);
            }
            Action::Removed(key) => {
                self.store.remove_by_key(&key);
                self.tracker.finish_write();
                self.tracker.finish_fetch_ok();
            }
            Action::Cleared => {
                self.tracker.clear();
            }
        }
    }

    /// In-flight guard for list fetches.
    pub fn should_fetch(&self) -> bool {
        self.tracker.should_fetch()
    }

    pub fn error(&self) -> Option<&str> {
        self.tracker.phase.error()
    }
}
