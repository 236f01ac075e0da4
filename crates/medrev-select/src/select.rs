//! Selection Pipeline: filter then sort, memoized per list surface.
//!
//! The pipeline is the derived view a list renders. It recomputes
//! synchronously whenever records, criteria, query, or order change,
//! and memoizes on their identity so unrelated re-renders reuse the
//! cached sequence. Record identity is the store generation counter
//! (bumped on every store write) rather than a deep comparison.
//!
//! When a date window is active the medicine key also carries the
//! evaluation instant, so recency is re-evaluated on every call; with
//! no date filter the cache behaves exactly like the user pipeline.

use chrono::{DateTime, Utc};
use medrev_model::{Medicine, User};
use tracing::trace;

use crate::criteria::{MedicineFilter, MedicineOrder, UserFilter, UserOrder};
use crate::filter::{filter_medicines, filter_users};
use crate::sort::{sort_medicines, sort_users};

/// Memoized derived view for the employee list.
#[derive(Debug, Default)]
pub struct UserSelection {
    key: Option<UserKey>,
    cached: Vec<User>,
}

#[derive(Debug, PartialEq)]
struct UserKey {
    generation: u64,
    criteria: UserFilter,
    query: String,
    order: UserOrder,
}

impl UserSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The exact sequence the employee list renders.
    pub fn select(
        &mut self,
        generation: u64,
        records: &[User],
        criteria: &UserFilter,
        query: &str,
        order: UserOrder,
    ) -> &[User] {
        let key = UserKey {
            generation,
            criteria: criteria.clone(),
            query: query.to_string(),
            order,
        };
        if self.key.as_ref() != Some(&key) {
            trace!(generation, query, "recomputing user selection");
            self.cached = sort_users(&filter_users(records, criteria, query), order);
            self.key = Some(key);
        }
        &self.cached
    }
}

/// Memoized derived view for the medicine list.
#[derive(Debug, Default)]
pub struct MedicineSelection {
    key: Option<MedicineKey>,
    cached: Vec<Medicine>,
}

#[derive(Debug, PartialEq)]
struct MedicineKey {
    generation: u64,
    criteria: MedicineFilter,
    query: String,
    order: MedicineOrder,
    /// Present only while a date window is active.
    evaluated_at: Option<DateTime<Utc>>,
}

impl MedicineSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The exact sequence the medicine list renders.
    pub fn select(
        &mut self,
        generation: u64,
        records: &[Medicine],
        criteria: &MedicineFilter,
        query: &str,
        order: MedicineOrder,
        now: DateTime<Utc>,
    ) -> &[Medicine] {
        let key = MedicineKey {
            generation,
            criteria: criteria.clone(),
            query: query.to_string(),
            order,
            evaluated_at: criteria.date.map(|_| now),
        };
        if self.key.as_ref() != Some(&key) {
            trace!(generation, query, "recomputing medicine selection");
            self.cached = sort_medicines(&filter_medicines(records, criteria, query, now), order);
            self.key = Some(key);
        }
        &self.cached
    }
}
