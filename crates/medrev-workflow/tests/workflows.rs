//! End-to-end workflow tests against an in-memory service fake.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use medrev_client::{
    ApiError, ClientConfig, CredentialStore, InMemoryCredentials, PersistedFields, PharmacyApi,
    Result,
};
use medrev_model::{
    Medicine, MedicinePatch, MedicineStatus, Registration, Role, SimilarityReport, User, UserPatch,
};
use medrev_store::{Action, FetchPhase};
use medrev_workflow::{
    MedicineReview, SaveOutcome, Session, StatusOutcome, UserDirectory, ViewScope,
};

fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        firstname: "Dana".to_string(),
        surname: "Levi".to_string(),
        email: format!("{id}@pharmacy.example"),
        role: Role::Pharm,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn medicine(name: &str, status: MedicineStatus) -> Medicine {
    Medicine {
        metadata_id: format!("md-{name}"),
        product_name: name.to_string(),
        category: Some("Ampoules".to_string()),
        intake_method: "IV".to_string(),
        manufacturer: "Medo".to_string(),
        manufacturing_country: "Cyprus".to_string(),
        country_registration: "Israel".to_string(),
        barcode: "7290015842006".to_string(),
        type_packaging: "Box".to_string(),
        status,
        created_at: Utc::now(),
        images_location: vec![],
        product_dosage: "1g".to_string(),
        product_active_ingredient: "Cefotaxime".to_string(),
    }
}

#[derive(Clone)]
enum Failure {
    NotFound,
    Unauthorized,
    Service(String),
}

impl Failure {
    fn to_error(&self) -> ApiError {
        match self {
            Failure::NotFound => ApiError::NotFound,
            Failure::Unauthorized => ApiError::Unauthorized,
            Failure::Service(message) => ApiError::Service(message.clone()),
        }
    }
}

#[derive(Default)]
struct FakeApi {
    users: Mutex<Vec<User>>,
    medicines: Mutex<Vec<Medicine>>,
    report: Mutex<Option<SimilarityReport>>,
    fail: Mutex<Option<Failure>>,
    calls: Mutex<Vec<String>>,
    last_fields: Mutex<Vec<&'static str>>,
}

impl FakeApi {
    fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Self::default()
        }
    }

    fn with_medicines(medicines: Vec<Medicine>) -> Self {
        Self {
            medicines: Mutex::new(medicines),
            ..Self::default()
        }
    }

    fn fail_with(&self, failure: Failure) {
        *self.fail.lock().unwrap() = Some(failure);
    }

    fn record(&self, call: &str) -> Result<()> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.fail.lock().unwrap().as_ref() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn persisted(names: &[&'static str]) -> PersistedFields {
        let map: BTreeMap<String, bool> = names
            .iter()
            .map(|name| ((*name).to_string(), true))
            .collect();
        PersistedFields(map)
    }
}

#[async_trait]
impl PharmacyApi for FakeApi {
    async fn login(&self, _id: &str, _password: &str) -> Result<String> {
        self.record("login")?;
        Ok("jwt-token".to_string())
    }

    async fn register(&self, registration: &Registration) -> Result<User> {
        self.record("register")?;
        Ok(User {
            id: registration.id.clone(),
            firstname: registration.firstname.clone(),
            surname: registration.surname.clone(),
            email: registration.email.clone(),
            role: registration.role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.record("list_users")?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        self.record("get_user")?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn update_user(&self, _id: &str, patch: &UserPatch) -> Result<PersistedFields> {
        self.record("update_user")?;
        let names = patch.field_names();
        *self.last_fields.lock().unwrap() = names.clone();
        Ok(Self::persisted(&names))
    }

    async fn delete_user(&self, _id: &str) -> Result<()> {
        self.record("delete_user")
    }

    async fn list_medicines(&self, status: MedicineStatus) -> Result<Vec<Medicine>> {
        self.record("list_medicines")?;
        Ok(self
            .medicines
            .lock()
            .unwrap()
            .iter()
            .filter(|medicine| medicine.status == status)
            .cloned()
            .collect())
    }

    async fn get_medicine_by_name(&self, name: &str) -> Result<Medicine> {
        self.record("get_medicine_by_name")?;
        self.medicines
            .lock()
            .unwrap()
            .iter()
            .find(|medicine| medicine.product_name == name)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn update_medicine(
        &self,
        _metadata_id: &str,
        patch: &MedicinePatch,
    ) -> Result<PersistedFields> {
        self.record("update_medicine")?;
        let names = patch.field_names();
        *self.last_fields.lock().unwrap() = names.clone();
        Ok(Self::persisted(&names))
    }

    async fn set_medicine_status(&self, metadata_id: &str, status: MedicineStatus) -> Result<()> {
        self.record("set_medicine_status")?;
        if let Some(medicine) = self
            .medicines
            .lock()
            .unwrap()
            .iter_mut()
            .find(|medicine| medicine.metadata_id == metadata_id)
        {
            medicine.status = status;
        }
        Ok(())
    }

    async fn similarity_report(&self, _response_id: &str) -> Result<SimilarityReport> {
        self.record("similarity_report")?;
        self.report.lock().unwrap().clone().ok_or(ApiError::NotFound)
    }
}

fn session() -> Arc<Session> {
    Session::new(Arc::new(InMemoryCredentials::with_token("jwt-token")))
}

fn config() -> ClientConfig {
    ClientConfig {
        status_refetch_delay: Duration::ZERO,
        ..ClientConfig::default()
    }
}

#[tokio::test]
async fn entering_user_list_populates_store() {
    let api = Arc::new(FakeApi::with_users(vec![user("1"), user("2")]));
    let mut directory = UserDirectory::new(api.clone(), session());
    let scope = ViewScope::new();

    directory.enter(&scope).await.unwrap();

    assert_eq!(directory.slice.store.len(), 2);
    assert_eq!(directory.slice.tracker.phase, FetchPhase::Success);
    assert_eq!(api.calls(), vec!["list_users"]);
}

#[tokio::test]
async fn in_flight_guard_skips_duplicate_fetch() {
    let api = Arc::new(FakeApi::with_users(vec![user("1")]));
    let mut directory = UserDirectory::new(api.clone(), session());
    let scope = ViewScope::new();

    directory.slice.apply(Action::FetchStarted);
    directory.enter(&scope).await.unwrap();

    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn cancelled_scope_discards_fetch() {
    let api = Arc::new(FakeApi::with_users(vec![user("1")]));
    let mut directory = UserDirectory::new(api.clone(), session());
    let scope = ViewScope::new();
    scope.cancel();

    directory.enter(&scope).await.unwrap();

    assert!(directory.slice.store.is_empty());
    assert_eq!(directory.slice.tracker.phase, FetchPhase::Idle);
}

#[tokio::test]
async fn leaving_resets_phase_and_keeps_records() {
    let api = Arc::new(FakeApi::with_users(vec![user("1")]));
    let mut directory = UserDirectory::new(api, session());
    let scope = ViewScope::new();

    directory.enter(&scope).await.unwrap();
    directory.leave();

    assert_eq!(directory.slice.tracker.phase, FetchPhase::Idle);
    assert_eq!(directory.slice.store.len(), 1);
}

#[tokio::test]
async fn unauthorized_response_signs_out_globally() {
    let api = Arc::new(FakeApi::default());
    api.fail_with(Failure::Unauthorized);
    let credentials = Arc::new(InMemoryCredentials::with_token("jwt-token"));
    let session = Session::new(credentials.clone());
    let mut directory = UserDirectory::new(api, session.clone());
    let scope = ViewScope::new();

    let error = directory.enter(&scope).await.unwrap_err();

    assert!(error.is_unauthorized());
    assert!(!session.is_authenticated());
    assert!(credentials.token().is_none());
    assert_eq!(
        directory.slice.error(),
        Some("session expired, please sign in again")
    );
}

#[tokio::test]
async fn profile_save_sends_only_changed_fields() {
    let api = Arc::new(FakeApi::default());
    let mut directory = UserDirectory::new(api.clone(), session());

    let original = user("1");
    let mut edited = original.clone();
    edited.email = "dana.levi@pharmacy.example".to_string();

    let outcome = directory.save_profile(&original, &edited).await.unwrap();

    assert_eq!(outcome, SaveOutcome::Saved(vec!["email".to_string()]));
    assert_eq!(*api.last_fields.lock().unwrap(), vec!["email"]);
    assert_eq!(
        directory.slice.store.current().map(|u| u.email.as_str()),
        Some("dana.levi@pharmacy.example")
    );
}

#[tokio::test]
async fn identical_profile_save_short_circuits() {
    let api = Arc::new(FakeApi::default());
    let mut directory = UserDirectory::new(api.clone(), session());

    let original = user("1");
    let outcome = directory
        .save_profile(&original, &original.clone())
        .await
        .unwrap();

    assert_eq!(outcome, SaveOutcome::NoChanges);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn acknowledged_delete_removes_locally_without_refetch() {
    let api = Arc::new(FakeApi::with_users(vec![user("1"), user("2")]));
    let mut directory = UserDirectory::new(api.clone(), session());
    let scope = ViewScope::new();

    directory.enter(&scope).await.unwrap();
    api.clear_calls();
    directory.remove("1").await.unwrap();

    assert_eq!(directory.slice.store.len(), 1);
    assert!(directory.slice.store.find("1").is_none());
    assert_eq!(api.calls(), vec!["delete_user"]);
}

#[tokio::test]
async fn missing_medicine_detail_reports_not_found() {
    let api = Arc::new(FakeApi::default());
    let mut review = MedicineReview::new(api, session(), &config());
    let scope = ViewScope::new();

    let error = review.load_detail(&scope, "Ghost").await.unwrap_err();

    assert!(error.is_not_found());
    assert!(review.slice.store.current().is_none());
    assert_eq!(review.slice.error(), Some("not found"));
}

#[tokio::test]
async fn similarity_failure_leaves_record_loaded() {
    let api = Arc::new(FakeApi::with_medicines(vec![medicine(
        "Cefotaxime",
        MedicineStatus::Pending,
    )]));
    let mut review = MedicineReview::new(api.clone(), session(), &config());
    let scope = ViewScope::new();

    review.load_detail(&scope, "Cefotaxime").await.unwrap();
    api.fail_with(Failure::Service("lasa offline".to_string()));
    let error = review.load_similarity(&scope, "resp-1").await.unwrap_err();

    assert_eq!(error.to_string(), "lasa offline");
    assert!(review.report.is_none());
    assert_eq!(review.similarity.phase.error(), Some("lasa offline"));
    assert!(review.slice.store.current().is_some());
}

#[tokio::test]
async fn open_detail_loads_record_and_report_together() {
    let api = Arc::new(FakeApi::with_medicines(vec![medicine(
        "Cefotaxime",
        MedicineStatus::Pending,
    )]));
    *api.report.lock().unwrap() = Some(SimilarityReport {
        response_id: "resp-1".to_string(),
        matches: vec![],
    });
    let mut review = MedicineReview::new(api.clone(), session(), &config());
    let scope = ViewScope::new();

    review
        .open_detail(&scope, "Cefotaxime", Some("resp-1"))
        .await
        .unwrap();

    assert!(review.slice.store.current().is_some());
    assert!(review.report.is_some());
    assert_eq!(review.similarity.phase, FetchPhase::Success);
    let mut calls = api.calls();
    calls.sort();
    assert_eq!(calls, vec!["get_medicine_by_name", "similarity_report"]);
}

#[tokio::test]
async fn open_detail_report_failure_keeps_the_record() {
    let api = Arc::new(FakeApi::with_medicines(vec![medicine(
        "Cefotaxime",
        MedicineStatus::Pending,
    )]));
    let mut review = MedicineReview::new(api, session(), &config());
    let scope = ViewScope::new();

    // No report seeded: the similarity lookup fails, the record loads.
    review
        .open_detail(&scope, "Cefotaxime", Some("resp-1"))
        .await
        .unwrap();

    assert!(review.slice.store.current().is_some());
    assert!(review.report.is_none());
    assert_eq!(review.similarity.phase.error(), Some("not found"));
}

#[tokio::test]
async fn approving_an_approved_record_is_refused() {
    let api = Arc::new(FakeApi::with_medicines(vec![medicine(
        "Cefotaxime",
        MedicineStatus::Approved,
    )]));
    let mut review = MedicineReview::new(api.clone(), session(), &config());
    let scope = ViewScope::new();

    review.load_detail(&scope, "Cefotaxime").await.unwrap();
    api.clear_calls();
    let outcome = review.approve().await.unwrap();

    assert_eq!(outcome, StatusOutcome::Refused);
    assert!(api.calls().is_empty());
    assert!(!review.slice.tracker.write_in_flight);
}

#[tokio::test]
async fn declining_a_completed_record_is_refused() {
    let api = Arc::new(FakeApi::with_medicines(vec![medicine(
        "Cefotaxime",
        MedicineStatus::Completed,
    )]));
    let mut review = MedicineReview::new(api.clone(), session(), &config());
    let scope = ViewScope::new();

    review.load_detail(&scope, "Cefotaxime").await.unwrap();
    api.clear_calls();
    let outcome = review.decline().await.unwrap();

    assert_eq!(outcome, StatusOutcome::Refused);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn approval_refetches_the_record_after_the_delay() {
    let api = Arc::new(FakeApi::with_medicines(vec![medicine(
        "Cefotaxime",
        MedicineStatus::Pending,
    )]));
    let mut review = MedicineReview::new(api.clone(), session(), &config());
    let scope = ViewScope::new();

    review.load_detail(&scope, "Cefotaxime").await.unwrap();
    api.clear_calls();
    let outcome = review.approve().await.unwrap();

    assert_eq!(outcome, StatusOutcome::Applied);
    assert_eq!(api.calls(), vec!["set_medicine_status", "get_medicine_by_name"]);
    assert_eq!(
        review.slice.store.current().map(|m| m.status),
        Some(MedicineStatus::Approved)
    );
}

#[tokio::test]
async fn status_scoped_list_fetch() {
    let api = Arc::new(FakeApi::with_medicines(vec![
        medicine("Cefotaxime", MedicineStatus::Pending),
        medicine("Ibuprofen", MedicineStatus::Approved),
    ]));
    let mut review = MedicineReview::new(api, session(), &config());
    let scope = ViewScope::new();

    review.enter(&scope, MedicineStatus::Approved).await.unwrap();

    assert_eq!(review.slice.store.len(), 1);
    assert_eq!(
        review.slice.store.records()[0].product_name.as_str(),
        "Ibuprofen"
    );
}

#[tokio::test]
async fn sign_in_stores_credential_and_opens_session() {
    let api = FakeApi::default();
    let credentials = Arc::new(InMemoryCredentials::new());
    let session = Session::new(credentials.clone());

    session.sign_in(&api, "123456789", "hunter2").await.unwrap();

    assert!(session.is_authenticated());
    assert_eq!(session.user_id().as_deref(), Some("123456789"));
    assert_eq!(credentials.token().as_deref(), Some("jwt-token"));
}

#[tokio::test]
async fn failed_sign_in_records_the_message() {
    let api = FakeApi::default();
    api.fail_with(Failure::Service("wrong id or password".to_string()));
    let session = Session::new(Arc::new(InMemoryCredentials::new()));

    let error = session.sign_in(&api, "123456789", "nope").await.unwrap_err();

    assert_eq!(error.to_string(), "wrong id or password");
    assert!(!session.is_authenticated());
    assert_eq!(
        session.login_error().as_deref(),
        Some("wrong id or password")
    );
}
