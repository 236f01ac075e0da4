//! Bearer credential seam.
//!
//! How the credential is persisted (cookie, keychain, file) is an
//! external concern; this crate only needs to read, replace, and
//! clear it. The in-memory implementation backs tests and the CLI's
//! per-invocation session.

use std::sync::RwLock;

/// Storage for the bearer credential obtained at login.
pub trait CredentialStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn store(&self, token: String);
    fn clear(&self);
}

/// Process-local credential storage.
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
    token: RwLock<Option<String>>,
}

impl InMemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl CredentialStore for InMemoryCredentials {
    fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn store(&self, token: String) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token);
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_and_clear() {
        let credentials = InMemoryCredentials::new();
        assert!(credentials.token().is_none());

        credentials.store("jwt-abc".to_string());
        assert_eq!(credentials.token().as_deref(), Some("jwt-abc"));

        credentials.clear();
        assert!(credentials.token().is_none());
    }
}
