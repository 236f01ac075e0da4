pub mod auth;
pub mod slice;
pub mod store;
pub mod tracker;

pub use auth::AuthState;
pub use slice::{Action, EntitySlice};
pub use store::{Keyed, RecordStore};
pub use tracker::{FetchPhase, Tracker};
