//! Fetch orchestration and mutation workflows.
//!
//! Sits between the client crate (the service seam) and the state
//! crate (slices driven by a pure reducer): every workflow method
//! makes the calls, absorbs unauthorized responses into a global
//! sign-out, and applies the resulting actions. Fetches run inside a
//! [`ViewScope`] so leaving a view cancels its in-flight work.
//!
//! # Example
//!
//! ```ignore
//! let session = Session::new(credentials.clone());
//! let mut medicines = MedicineReview::new(api, session, &config);
//! let scope = ViewScope::new();
//! medicines.enter(&scope, MedicineStatus::Pending).await?;
//! ```

pub mod medicines;
pub mod outcome;
pub mod scope;
pub mod session;
pub mod users;

pub use medicines::{MedicineReview, status_change_allowed};
pub use outcome::{SaveOutcome, StatusOutcome};
pub use scope::ViewScope;
pub use session::Session;
pub use users::UserDirectory;
