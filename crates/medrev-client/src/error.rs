//! Client error taxonomy.
//!
//! The variants map one-to-one to how the dashboard reacts: transport
//! failures show a generic message, not-found renders a dedicated
//! empty state, validation errors land next to the form, and an
//! unauthorized response triggers a global sign-out.

use medrev_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No credential is stored; the call was refused before any
    /// network attempt.
    #[error("not authenticated")]
    Unauthenticated,

    /// The service rejected the credential. Callers must sign out
    /// globally; nothing else can succeed.
    #[error("session expired, please sign in again")]
    Unauthorized,

    /// A single-record lookup returned no match. Distinct from a
    /// transport error so detail views can render "not found".
    #[error("not found")]
    NotFound,

    /// The service rejected a write payload.
    #[error("{0}")]
    Validation(String),

    /// The service supplied a specific failure message.
    #[error("{0}")]
    Service(String),

    /// Network-level failure with no service message. Displays as a
    /// generic message; the detail is kept for logs.
    #[error("an unexpected error occurred")]
    Transport(String),

    /// The response body did not parse into the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Transport(error.to_string())
    }
}

impl From<ModelError> for ApiError {
    fn from(error: ModelError) -> Self {
        ApiError::Decode(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
