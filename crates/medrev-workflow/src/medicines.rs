//! Medicine review workflows.
//!
//! The medicines slice is status-scoped: the waiting surface fetches
//! pending records, the certified surface approved ones. The detail
//! resolver loads the record and its LASA similarity report on
//! independent trackers, so a failed report never blanks the record.
//! Status changes are guarded locally and followed by a delayed
//! re-fetch of the single record.

use std::sync::Arc;
use std::time::Duration;

use medrev_client::{ApiError, ClientConfig, PharmacyApi};
use medrev_model::{Medicine, MedicinePatch, MedicineStatus, SimilarityReport};
use medrev_store::{Action, EntitySlice, Tracker};
use tracing::{debug, info};

use crate::outcome::{SaveOutcome, StatusOutcome};
use crate::scope::ViewScope;
use crate::session::Session;

/// Whether a status transition may be requested from the given state.
/// Approving an approved record and declining a completed one are
/// refused before any request is made.
pub fn status_change_allowed(current: MedicineStatus, target: MedicineStatus) -> bool {
    match target {
        MedicineStatus::Approved => current != MedicineStatus::Approved,
        MedicineStatus::Completed => current != MedicineStatus::Completed,
        MedicineStatus::Pending => false,
    }
}

pub struct MedicineReview {
    api: Arc<dyn PharmacyApi>,
    session: Arc<Session>,
    pub slice: EntitySlice<Medicine>,
    /// Lifecycle of the similarity report fetch, independent of the
    /// record's own tracker.
    pub similarity: Tracker,
    pub report: Option<SimilarityReport>,
    refetch_delay: Duration,
}

impl MedicineReview {
    pub fn new(api: Arc<dyn PharmacyApi>, session: Arc<Session>, config: &ClientConfig) -> Self {
        Self {
            api,
            session,
            slice: EntitySlice::new(),
            similarity: Tracker::new(),
            report: None,
            refetch_delay: config.status_refetch_delay,
        }
    }

    /// List view mount for one status surface.
    pub async fn enter(&mut self, scope: &ViewScope, status: MedicineStatus) -> Result<(), ApiError> {
        if !self.slice.should_fetch() {
            debug!(%status, "medicine list fetch already in flight, skipping");
            return Ok(());
        }
        self.slice.apply(Action::FetchStarted);
        match scope.run(self.api.list_medicines(status)).await {
            Ok(Ok(medicines)) => {
                self.slice.apply(Action::FetchSucceeded(medicines));
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

    pub fn leave(&mut self) {
        self.slice.apply(Action::Cleared);
        self.similarity.clear();
        self.report = None;
    }

    /// Name-based detail lookup. The current slot is nulled up front
    /// so a stale record never shows while the fetch runs.
    pub async fn load_detail(&mut self, scope: &ViewScope, name: &str) -> Result<(), ApiError> {
        self.slice.apply(Action::DetailStarted);
        match scope.run(self.api.get_medicine_by_name(name)).await {
            Ok(Ok(medicine)) => {
                self.slice.apply(Action::DetailSucceeded(medicine));
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

    /// Fetch the LASA report for an analyzed response. Failures stay
    /// on the similarity tracker; the loaded record is untouched.
    pub async fn load_similarity(
        &mut self,
        scope: &ViewScope,
        response_id: &str,
    ) -> Result<(), ApiError> {
        self.similarity.start_fetch();
        self.report = None;
        match scope.run(self.api.similarity_report(response_id)).await {
            Ok(Ok(report)) => {
                debug!(%response_id, matches = report.matches.len(), "similarity report loaded");
                self.report = Some(report);
                self.similarity.finish_fetch_ok();
                Ok(())
            }
            Ok(Err(error)) => {
                self.session.absorb(&error);
                self.similarity.finish_fetch_err(error.to_string());
                Err(error)
            }
            Err(_aborted) => {
                self.similarity.clear();
                Ok(())
            }
        }
    }

    /// Detail screen mount: fetch the record and, when a response id
    /// is known, its similarity report concurrently. Neither fetch
    /// waits on the other; a failed report never blocks the record.
    pub async fn open_detail(
        &mut self,
        scope: &ViewScope,
        name: &str,
        response_id: Option<&str>,
    ) -> Result<(), ApiError> {
        let Some(response_id) = response_id else {
            return self.load_detail(scope, name).await;
        };
        self.slice.apply(Action::DetailStarted);
        self.similarity.start_fetch();
        self.report = None;
        let (record, report) = futures::join!(
            scope.run(self.api.get_medicine_by_name(name)),
            scope.run(self.api.similarity_report(response_id)),
        );
        match report {
            Ok(Ok(report)) => {
                self.report = Some(report);
                self.similarity.finish_fetch_ok();
            }
            Ok(Err(error)) => {
                self.session.absorb(&error);
                self.similarity.finish_fetch_err(error.to_string());
            }
            Err(_aborted) => self.similarity.clear(),
        }
        match record {
            Ok(Ok(medicine)) => {
                self.slice.apply(Action::DetailSucceeded(medicine));
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

    /// Save edits to the loaded record. Only changed fields travel; an
    /// empty diff short-circuits without touching the network.
    pub async fn save_edits(
        &mut self,
        original: &Medicine,
        edited: &Medicine,
    ) -> Result<SaveOutcome, ApiError> {
        let patch = MedicinePatch::diff(original, edited);
        if patch.is_empty() {
            debug!(metadata_id = %original.metadata_id, "no medicine changes to save");
            return Ok(SaveOutcome::NoChanges);
        }
        self.slice.apply(Action::WriteStarted);
        match self.api.update_medicine(&original.metadata_id, &patch).await {
            Ok(persisted) => {
                let echo = persisted.any_persisted().then(|| edited.clone());
                self.slice.apply(Action::WriteSucceeded(echo));
                info!(
                    metadata_id = %original.metadata_id,
                    fields = ?persisted.persisted_names(),
                    "medicine saved"
                );
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

    /// Certify the loaded record.
    pub async fn approve(&mut self) -> Result<StatusOutcome, ApiError> {
        self.transition(MedicineStatus::Approved).await
    }

    /// Decline the loaded record.
    pub async fn decline(&mut self) -> Result<StatusOutcome, ApiError> {
        self.transition(MedicineStatus::Completed).await
    }

    async fn transition(&mut self, target: MedicineStatus) -> Result<StatusOutcome, ApiError> {
        let Some(current) = self.slice.store.current().cloned() else {
            return Err(ApiError::NotFound);
        };
        if !status_change_allowed(current.status, target) {
            debug!(
                metadata_id = %current.metadata_id,
                from = %current.status,
                to = %target,
                "status change refused"
            );
            return Ok(StatusOutcome::Refused);
        }
        self.slice.apply(Action::WriteStarted);
        match self.api.set_medicine_status(&current.metadata_id, target).await {
            Ok(()) => {
                self.slice.apply(Action::WriteSucceeded(None));
                info!(metadata_id = %current.metadata_id, %target, "status changed");
                // The status pipeline is eventually consistent; give it
                // a moment before re-reading the record.
                tokio::time::sleep(self.refetch_delay).await;
                self.refresh_detail(&current.product_name).await;
                Ok(StatusOutcome::Applied)
            }
            Err(error) => {
                self.session.absorb(&error);
                self.slice.apply(Action::WriteFailed(error.to_string()));
                Err(error)
            }
        }
    }

    async fn refresh_detail(&mut self, name: &str) {
        self.slice.apply(Action::DetailStarted);
        match self.api.get_medicine_by_name(name).await {
            Ok(medicine) => self.slice.apply(Action::DetailSucceeded(medicine)),
            Err(error) => {
                self.session.absorb(&error);
                self.slice.apply(Action::DetailFailed(error.to_string()));
            }
        }
    }
}
