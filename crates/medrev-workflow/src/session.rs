//! Signed-in session, shared by every workflow.
//!
//! Wraps the auth slice together with the credential store so sign-in
//! and sign-out stay atomic from the workflows' point of view. Any
//! unauthorized response funnels through [`Session::absorb`], which
//! signs out globally; with a rejected credential no further call can
//! succeed.

use std::sync::{Arc, Mutex, MutexGuard};

use medrev_client::{ApiError, CredentialStore, PharmacyApi};
use medrev_store::AuthState;
use tracing::{info, warn};

pub struct Session {
    credentials: Arc<dyn CredentialStore>,
    state: Mutex<AuthState>,
}

impl Session {
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Arc<Self> {
        Arc::new(Self {
            credentials,
            state: Mutex::new(AuthState::new()),
        })
    }

    fn state(&self) -> MutexGuard<'_, AuthState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// Employee id of the signed-in user, for the "(You)" row marker.
    pub fn user_id(&self) -> Option<String> {
        self.state().user_id.clone()
    }

    pub fn login_error(&self) -> Option<String> {
        self.state().tracker.phase.error().map(str::to_string)
    }

    /// Exchange credentials for a token and open the session.
    pub async fn sign_in(
        &self,
        api: &dyn PharmacyApi,
        id: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        self.state().start_login();
        match api.login(id, password).await {
            Ok(token) => {
                self.credentials.store(token);
                self.state().finish_login(id.to_string());
                info!(%id, "signed in");
                Ok(())
            }
            Err(error) => {
                self.state().fail_login(error.to_string());
                Err(error)
            }
        }
    }

    /// Clear the credential and the session state.
    pub fn sign_out(&self) {
        self.credentials.clear();
        self.state().sign_out();
    }

    /// Global reaction to an API failure: a rejected credential ends
    /// the session, everything else is the caller's to surface.
    pub fn absorb(&self, error: &ApiError) {
        if error.is_unauthorized() {
            warn!("credential rejected, signing out");
            self.sign_out();
        }
    }
}
