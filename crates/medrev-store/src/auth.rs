//! Authentication slice.
//!
//! Holds the signed-in session the other slices depend on: the bearer
//! credential lives behind a seam in the client crate, so this slice
//! only tracks who is signed in and the login call's lifecycle. An
//! unauthorized response anywhere triggers a global sign-out rather
//! than a local error, since no further call can succeed.

use serde::{Deserialize, Serialize};

use crate::tracker::{FetchPhase, Tracker};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    /// Employee id of the signed-in user, once login succeeds.
    pub user_id: Option<String>,
    pub tracker: Tracker,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn start_login(&mut self) {
        self.tracker.start_fetch();
    }

    pub fn finish_login(&mut self, user_id: String) {
        self.user_id = Some(user_id);
        self.tracker.finish_fetch_ok();
    }

    pub fn fail_login(&mut self, message: impl Into<String>) {
        self.user_id = None;
        self.tracker.finish_fetch_err(message);
    }

    /// Global sign-out: clears the session and resets the phase. The
    /// caller is responsible for clearing the stored credential.
    pub fn sign_out(&mut self) {
        self.user_id = None;
        self.tracker = Tracker::new();
    }
}
