//! Async mutation tracker.
//!
//! The source of truth for "is this list loading", "is this row being
//! mutated", and "what went wrong". The fetch lifecycle is an explicit
//! tagged union instead of a bundle of booleans, so the ambiguous flag
//! combinations the boolean encoding allowed are unrepresentable.
//! Write-in-flight is tracked orthogonally: a row-level delete spinner
//! must not light up the whole-list spinner.

use serde::{Deserialize, Serialize};

/// Lifecycle of the most recent read for an entity kind.
///
/// `Success` and `Error` persist until an explicit [`Tracker::clear`],
/// mirroring the view mount/unmount contract: leaving a list view
/// clears its phase so a stale toast never greets re-entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl FetchPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchPhase::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchPhase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Per-entity-kind tracker: fetch phase plus the orthogonal
/// write-in-flight flag (the source called it `isEvent`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    pub phase: FetchPhase,
    pub write_in_flight: bool,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard used before dispatching a list fetch: skip when one is
    /// already in flight for this entity kind.
    pub fn should_fetch(&self) -> bool {
        !self.phase.is_loading()
    }

    pub fn start_fetch(&mut self) {
        self.phase = FetchPhase::Loading;
    }

    pub fn finish_fetch_ok(&mut self) {
        self.phase = FetchPhase::Success;
    }

    pub fn finish_fetch_err(&mut self, message: impl Into<String>) {
        self.phase = FetchPhase::Error(message.into());
    }

    pub fn start_write(&mut self) {
        self.write_in_flight = true;
    }

    pub fn finish_write(&mut self) {
        self.write_in_flight = false;
    }

    /// Explicit reset back to `Idle`, dispatched by the consuming view
    /// on unmount.
    pub fn clear(&mut self) {
        self.phase = FetchPhase::Idle;
    }
}
