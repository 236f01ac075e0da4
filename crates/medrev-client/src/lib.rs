pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;

pub use api::{PersistedFields, PharmacyApi};
pub use config::{ClientConfig, ConfigError};
pub use credentials::{CredentialStore, InMemoryCredentials};
pub use error::{ApiError, Result};
pub use http::HttpPharmacyApi;
