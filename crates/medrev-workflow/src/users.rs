//! Employee directory workflows.
//!
//! Drives the users slice through its reducer: list fetch with the
//! in-flight guard, detail lookup, diff-based profile saves, account
//! creation, and local removal after an acknowledged delete.

use std::sync::Arc;

use medrev_client::{ApiError, PharmacyApi};
use medrev_model::{Registration, User, UserPatch};
use medrev_store::{Action, EntitySlice};
use tracing::{debug, info};

use crate::outcome::SaveOutcome;
use crate::scope::ViewScope;
use crate::session::Session;

pub struct UserDirectory {
    api: Arc<dyn PharmacyApi>,
    session: Arc<Session>,
    pub slice: EntitySlice<User>,
}

impl UserDirectory {
    pub fn new(api: Arc<dyn PharmacyApi>, session: Arc<Session>) -> Self {
        Self {
            api,
            session,
            slice: EntitySlice::new(),
        }
    }

    /// List view mount: fetch unless a fetch is already in flight.
    pub async fn enter(&mut self, scope: &ViewScope) -> Result<(), ApiError> {
        if !self.slice.should_fetch() {
            debug!("user list fetch already in flight, skipping");
            return Ok(());
        }
        self.slice.apply(Action::FetchStarted);
        match scope.run(self.api.list_users()).await {
            Ok(Ok(users)) => {
                self.slice.apply(Action::FetchSucceeded(users));
                Ok(())
            }
            Ok(Err(error)) => {
                self.session.absorb(&error);
                self.slice.apply(Action::FetchFailed(error.to_string()));
                Err(error)
            }
            Err(_aborted) => {
                self.slice.apply(Action::Cleared);
                Ok(())
            }
        }
    }

    /// List view unmount: reset the phase so stale errors do not
    /// survive re-entry.
    pub fn leave(&mut self) {
        self.slice.apply(Action::Cleared);
    }

    pub async fn load_detail(&mut self, scope: &ViewScope, id: &str) -> Result<(), ApiError> {
        self.slice.apply(Action::DetailStarted);
        match scope.run(self.api.get_user(id)).await {
            Ok(Ok(user)) => {
                self.slice.apply(Action::DetailSucceeded(user));
                Ok(())
            }
            Ok(Err(error)) => {
                self.session.absorb(&error);
                self.slice.apply(Action::DetailFailed(error.to_string()));
                Err(error)
            }
            Err(_aborted) => {
                self.slice.apply(Action::Cleared);
                Ok(())
            }
        }
    }

    /// Save edits to a profile. Only changed fields travel; an empty
    /// diff short-circuits without touching the network.
    pub async fn save_profile(
        &mut self,
        original: &User,
        edited: &User,
    ) -> Result<SaveOutcome, ApiError> {
        let patch = UserPatch::diff(original, edited);
        if patch.is_empty() {
            debug!(id = %original.id, "no profile changes to save");
            return Ok(SaveOutcome::NoChanges);
        }
        self.slice.apply(Action::WriteStarted);
        match self.api.update_user(&original.id, &patch).await {
            Ok(persisted) => {
                let echo = persisted.any_persisted().then(|| edited.clone());
                self.slice.apply(Action::WriteSucceeded(echo));
                info!(id = %original.id, fields = ?persisted.persisted_names(), "profile saved");
                Ok(SaveOutcome::Saved(
                    persisted
                        .persisted_names()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                ))
            }
            Err(error) => {
                self.session.absorb(&error);
                self.slice.apply(Action::WriteFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Admin-initiated account creation. The list view re-fetches on
    /// its next mount; nothing is inserted locally.
    pub async fn create(&mut self, registration: &Registration) -> Result<User, ApiError> {
        self.slice.apply(Action::WriteStarted);
        match self.api.register(registration).await {
            Ok(user) => {
                self.slice.apply(Action::WriteSucceeded(None));
                info!(id = %user.id, "account created");
                Ok(user)
            }
            Err(error) => {
                self.session.absorb(&error);
                self.slice.apply(Action::WriteFailed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Delete an account; on acknowledgement the record is removed
    /// locally instead of re-fetching the list.
    pub async fn remove(&mut self, id: &str) -> Result<(), ApiError> {
        self.slice.apply(Action::WriteStarted);
        match self.api.delete_user(id).await {
            Ok(()) => {
                self.slice.apply(Action::Removed(id.to_string()));
                info!(%id, "account deleted");
                Ok(())
            }
            Err(error) => {
                self.session.absorb(&error);
                self.slice.apply(Action::WriteFailed(error.to_string()));
                Err(error)
            }
        }
    }
}
