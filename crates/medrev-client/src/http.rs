//! `reqwest`-backed implementation of [`PharmacyApi`].
//!
//! Raw wire shapes are parsed into validated records here, at the
//! boundary, so nothing past this module sees loosely-typed JSON.
//! Every protected call checks the credential store first and refuses
//! with `Unauthenticated` before touching the network.

use std::sync::Arc;

use async_trait::async_trait;
use medrev_model::{
    Medicine, MedicinePatch, MedicineStatus, RawMedicine, RawUser, Registration, SimilarityReport,
    User, UserPatch,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::api::{PersistedFields, PharmacyApi};
use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::error::{ApiError, Result};

pub struct HttpPharmacyApi {
    http: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

impl HttpPharmacyApi {
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fail fast when no credential is stored.
    fn bearer(&self) -> Result<String> {
        self.credentials.token().ok_or(ApiError::Unauthenticated)
    }

    async fn ensure_ok(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);
        warn!(status = status.as_u16(), ?detail, "service call failed");
        Err(classify(status.as_u16(), detail))
    }
}

/// Map an HTTP status plus optional service-supplied detail onto the
/// error taxonomy.
fn classify(status: u16, detail: Option<String>) -> ApiError {
    match status {
        401 | 403 => ApiError::Unauthorized,
        404 => ApiError::NotFound,
        400 | 422 => {
            ApiError::Validation(detail.unwrap_or_else(|| "invalid request".to_string()))
        }
        _ => match detail {
            Some(message) => ApiError::Service(message),
            None => ApiError::Transport(format!("http status {status}")),
        },
    }
}

#[async_trait]
impl PharmacyApi for HttpPharmacyApi {
    async fn login(&self, id: &str, password: &str) -> Result<String> {
        debug!(%id, "login");
        let response = self
            .http
            .post(self.url("/login"))
            .json(&json!({ "id": id, "password": password }))
            .send()
            .await?;
        let body: LoginResponse = Self::ensure_ok(response).await?.json().await?;
        Ok(body.access_token)
    }

    async fn register(&self, registration: &Registration) -> Result<User> {
        let token = self.bearer()?;
        debug!(id = %registration.id, "register user");
        let response = self
            .http
            .post(self.url("/register"))
            .bearer_auth(token)
            .json(registration)
            .send()
            .await?;
        let raw: RawUser = Self::ensure_ok(response).await?.json().await?;
        Ok(raw.parse()?)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let token = self.bearer()?;
        debug!("list users");
        let response = self
            .http
            .get(self.url("/users"))
            .bearer_auth(token)
            .send()
            .await?;
        let raw: Vec<RawUser> = Self::ensure_ok(response).await?.json().await?;
        raw.into_iter()
            .map(|user| user.parse().map_err(ApiError::from))
            .collect()
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        let token = self.bearer()?;
        debug!(%id, "get user");
        let response = self
            .http
            .get(self.url(&format!("/users/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        let raw: RawUser = Self::ensure_ok(response).await?.json().await?;
        Ok(raw.parse()?)
    }

    async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<PersistedFields> {
        let token = self.bearer()?;
        debug!(%id, fields = ?patch.field_names(), "update user");
        let response = self
            .http
            .put(self.url(&format!("/users/{id}")))
            .bearer_auth(token)
            .json(patch)
            .send()
            .await?;
        Ok(Self::ensure_ok(response).await?.json().await?)
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        let token = self.bearer()?;
        debug!(%id, "delete user");
        let response = self
            .http
            .delete(self.url(&format!("/users/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Self::ensure_ok(response).await?;
        Ok(())
    }

    async fn list_medicines(&self, status: MedicineStatus) -> Result<Vec<Medicine>> {
        let token = self.bearer()?;
        debug!(%status, "list medicines");
        let response = self
            .http
            .get(self.url("/medicines"))
            .query(&[("status", status.as_str())])
            .bearer_auth(token)
            .send()
            .await?;
        let raw: Vec<RawMedicine> = Self::ensure_ok(response).await?.json().await?;
        raw.into_iter()
            .map(|medicine| medicine.parse().map_err(ApiError::from))
            .collect()
    }

    async fn get_medicine_by_name(&self, name: &str) -> Result<Medicine> {
        let token = self.bearer()?;
        debug!(%name, "get medicine");
        let response = self
            .http
            .get(self.url(&format!("/metadata/{name}")))
            .bearer_auth(token)
            .send()
            .await?;
        let raw: RawMedicine = Self::ensure_ok(response).await?.json().await?;
        Ok(raw.parse()?)
    }

    async fn update_medicine(
        &self,
        metadata_id: &str,
        patch: &MedicinePatch,
    ) -> Result<PersistedFields> {
        let token = self.bearer()?;
        debug!(%metadata_id, fields = ?patch.field_names(), "update medicine");
        let response = self
            .http
            .put(self.url(&format!("/metadata/{metadata_id}")))
            .bearer_auth(token)
            .json(patch)
            .send()
            .await?;
        Ok(Self::ensure_ok(response).await?.json().await?)
    }

    async fn set_medicine_status(&self, metadata_id: &str, status: MedicineStatus) -> Result<()> {
        let token = self.bearer()?;
        debug!(%metadata_id, %status, "set medicine status");
        let response = self
            .http
            .put(self.url(&format!("/metadata/{metadata_id}/status")))
            .bearer_auth(token)
            .json(&json!({ "status": status }))
            .send()
            .await?;
        Self::ensure_ok(response).await?;
        Ok(())
    }

    async fn similarity_report(&self, response_id: &str) -> Result<SimilarityReport> {
        let token = self.bearer()?;
        debug!(%response_id, "similarity report");
        let response = self
            .http
            .get(self.url(&format!("/find_similar/{response_id}")))
            .bearer_auth(token)
            .send()
            .await?;
        Ok(Self::ensure_ok(response).await?.json().await?)
    }
}
