//! Filter and sort criteria for the list surfaces.
//!
//! Criteria are ephemeral UI state. The toggle methods encode the
//! all/specific exclusivity rules the filter popovers implement:
//! choosing "All" clears every specific flag, choosing any specific
//! flag clears "All", and when the last specific flag is switched off
//! "All" reactivates on its own. The date filter is mutually
//! exclusive with itself: picking one window clears the other, and
//! re-picking the active window clears the date filter entirely.

use std::collections::BTreeSet;

use chrono::Duration;
use medrev_model::Role;
use serde::{Deserialize, Serialize};

/// Role filter for the employee list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    pub all: bool,
    pub pharm: bool,
    pub tech: bool,
    pub admin: bool,
}

impl Default for UserFilter {
    fn default() -> Self {
        Self {
            all: true,
            pharm: false,
            tech: false,
            admin: false,
        }
    }
}

impl UserFilter {
    /// Select the "All" choice, clearing every specific role.
    pub fn select_all(&mut self) {
        *self = Self::default();
    }

    /// Toggle one specific role flag.
    pub fn toggle_role(&mut self, role: Role) {
        self.all = false;
        let flag = self.flag_mut(role);
        *flag = !*flag;
        if !self.pharm && !self.tech && !self.admin {
            self.all = true;
        }
    }

    /// Whether a record with this role passes the filter.
    pub fn allows(&self, role: Role) -> bool {
        self.all || *self.flag(role)
    }

    fn flag(&self, role: Role) -> &bool {
        match role {
            Role::Pharm => &self.pharm,
            Role::Tech => &self.tech,
            Role::Admin => &self.admin,
        }
    }

    fn flag_mut(&mut self, role: Role) -> &mut bool {
        match role {
            Role::Pharm => &mut self.pharm,
            Role::Tech => &mut self.tech,
            Role::Admin => &mut self.admin,
        }
    }
}

/// Category ("group type") filter for the medicine list.
///
/// Category keys are dynamic: they come from whatever categories the
/// fetched records carry, plus the synthetic
/// [`medrev_model::NO_CATEGORY`] bucket for records without one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFilter {
    selected: BTreeSet<String>,
}

impl GroupFilter {
    /// True when no specific category is selected ("All").
    pub fn is_all(&self) -> bool {
        self.selected.is_empty()
    }

    /// Select the "All" choice, clearing every specific category.
    pub fn select_all(&mut self) {
        self.selected.clear();
    }

    /// Toggle one category bucket.
    pub fn toggle(&mut self, bucket: &str) {
        if !self.selected.remove(bucket) {
            self.selected.insert(bucket.to_string());
        }
    }

    /// Whether a record in this bucket passes the filter.
    pub fn allows(&self, bucket: &str) -> bool {
        self.is_all() || self.selected.contains(bucket)
    }

    /// Currently selected buckets, in lexical order.
    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }
}

/// Recency window for the medicine date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateWindow {
    OneDay,
    ThreeWeeks,
}

impl DateWindow {
    pub fn duration(self) -> Duration {
        match self {
            DateWindow::OneDay => Duration::hours(24),
            DateWindow::ThreeWeeks => Duration::days(21),
        }
    }
}

/// Combined medicine filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineFilter {
    pub group: GroupFilter,
    pub date: Option<DateWindow>,
}

impl MedicineFilter {
    /// Toggle a date window. Picking the inactive window switches to
    /// it; picking the active one clears the date filter.
    pub fn toggle_date(&mut self, window: DateWindow) {
        self.date = if self.date == Some(window) {
            None
        } else {
            Some(window)
        };
    }
}

/// Sort direction for the employee list (lexicographic over `id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserOrder {
    Asc,
    Desc,
}

/// Sort direction for the medicine list (chronological over
/// `created_at`; `New` puts the most recent first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicineOrder {
    New,
    Old,
}
