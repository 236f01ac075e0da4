//! Service API seam.
//!
//! The workflow layer programs against this trait; the HTTP
//! implementation lives in [`crate::http`] and tests substitute an
//! in-memory fake. Exact HTTP shapes are the implementation's
//! business, the data shapes here are the contract.

use std::collections::BTreeMap;

use async_trait::async_trait;
use medrev_model::{
    Medicine, MedicinePatch, MedicineStatus, Registration, SimilarityReport, User, UserPatch,
};
use serde::Deserialize;

use crate::error::Result;

/// Which fields the service actually persisted from a partial update.
///
/// The success notice must name exactly these fields, so the map is
/// kept ordered for deterministic messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersistedFields(pub BTreeMap<String, bool>);

impl PersistedFields {
    /// Names of the fields the service confirmed, in field order.
    pub fn persisted_names(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, persisted)| **persisted)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn any_persisted(&self) -> bool {
        self.0.values().any(|persisted| *persisted)
    }
}

/// The pharmacy administration service, as consumed by the dashboard.
///
/// Every method other than `login` requires a stored credential and
/// fails fast with [`crate::ApiError::Unauthenticated`] when none is
/// present.
#[async_trait]
pub trait PharmacyApi: Send + Sync {
    /// Exchange credentials for a bearer token. The token is handed
    /// back rather than stored, so the caller decides the session's
    /// lifetime.
    async fn login(&self, id: &str, password: &str) -> Result<String>;

    /// Admin-initiated account creation.
    async fn register(&self, registration: &Registration) -> Result<User>;

    async fn list_users(&self) -> Result<Vec<User>>;

    async fn get_user(&self, id: &str) -> Result<User>;

    /// Partial profile update; only changed fields are in the patch.
    async fn update_user(&self, id: &str, patch: &UserPatch) -> Result<PersistedFields>;

    /// Irreversible delete.
    async fn delete_user(&self, id: &str) -> Result<()>;

    /// Status-scoped list fetch (waiting vs certified surfaces).
    async fn list_medicines(&self, status: MedicineStatus) -> Result<Vec<Medicine>>;

    /// Name-based lookup backing the detail routes.
    async fn get_medicine_by_name(&self, name: &str) -> Result<Medicine>;

    /// Partial field update; returns which fields were persisted.
    async fn update_medicine(
        &self,
        metadata_id: &str,
        patch: &MedicinePatch,
    ) -> Result<PersistedFields>;

    /// Dedicated status transition endpoint.
    async fn set_medicine_status(&self, metadata_id: &str, status: MedicineStatus) -> Result<()>;

    /// LASA similarity report for an analyzed medicine response.
    async fn similarity_report(&self, response_id: &str) -> Result<SimilarityReport>;
}
