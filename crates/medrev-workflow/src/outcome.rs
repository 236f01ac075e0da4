//! Results the mutation workflows report back to the surface layer.

/// Outcome of a save flow built on a field-level diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The diff was empty; nothing was sent to the service.
    NoChanges,
    /// The service persisted these fields; the notice names exactly
    /// them.
    Saved(Vec<String>),
}

/// Outcome of an approve/decline request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    Applied,
    /// The record was already in a state that forbids the transition;
    /// no request was made.
    Refused,
}
