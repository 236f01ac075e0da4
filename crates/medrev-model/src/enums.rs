//! Type-safe enumerations for the review dashboard.
//!
//! The backing service represents roles and review statuses as
//! lowercase strings on the wire. These enums give them closed,
//! compile-time checked forms; unknown strings are rejected at the
//! service boundary rather than carried around as free text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Employee role. Exactly three values exist; `id` plus role is the
/// whole authorization story on the dashboard side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Tech,
    Pharm,
}

impl Role {
    /// Wire form as the service expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Tech => "tech",
            Role::Pharm => "pharm",
        }
    }

    /// Human-facing label used by list and badge surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Tech => "Technical",
            Role::Pharm => "Pharmacy",
        }
    }

    /// All roles in display order.
    pub fn all() -> [Role; 3] {
        [Role::Pharm, Role::Tech, Role::Admin]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "tech" => Ok(Role::Tech),
            "pharm" => Ok(Role::Pharm),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}

/// Review status of a medicine.
///
/// Transitions are one-directional in normal flow: `pending` moves to
/// `approved` or to `completed` (the review surface labels the latter
/// "decline"; the service stores it as completed). An earlier revision
/// of the service used a capitalized `Pending/Decline/Approved` scheme;
/// the lowercase three-state form is authoritative and the parser
/// accepts both spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicineStatus {
    Pending,
    Approved,
    Completed,
}

impl MedicineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MedicineStatus::Pending => "pending",
            MedicineStatus::Approved => "approved",
            MedicineStatus::Completed => "completed",
        }
    }

    /// Capitalized label for display surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            MedicineStatus::Pending => "Pending",
            MedicineStatus::Approved => "Approved",
            MedicineStatus::Completed => "Completed",
        }
    }

    /// True while the medicine is still waiting for a review decision.
    pub fn is_pending(&self) -> bool {
        matches!(self, MedicineStatus::Pending)
    }
}

impl fmt::Display for MedicineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MedicineStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(MedicineStatus::Pending),
            "approved" => Ok(MedicineStatus::Approved),
            // "decline" survives from the earlier capitalized scheme
            "completed" | "decline" | "declined" => Ok(MedicineStatus::Completed),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}
