//! Employee account records.
//!
//! The service sends users as loosely-typed JSON; [`RawUser`] is the
//! wire shape and [`User`] the validated record the rest of the
//! workspace operates on. Profile updates go through [`UserPatch`],
//! which carries only the fields that actually changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::Role;
use crate::error::{ModelError, Result};

/// A validated employee record.
///
/// `id` is the stable unique identifier and doubles as the login
/// credential; it is immutable after registration, as is the password
/// (which never appears in this shape at all).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub firstname: String,
    pub surname: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// "Firstname Surname" as shown on list rows.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.surname)
    }
}

/// Wire shape for a user record, parsed before anything trusts it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub id: String,
    pub firstname: String,
    pub surname: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub updated_at: String,
}

impl RawUser {
    pub fn parse(self) -> Result<User> {
        if self.id.is_empty() {
            return Err(ModelError::MissingField("id"));
        }
        Ok(User {
            role: self.role.parse()?,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
            id: self.id,
            firstname: self.firstname,
            surname: self.surname,
            email: self.email,
        })
    }
}

/// Partial update payload: only changed fields are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UserPatch {
    /// Field-level diff between the originally loaded record and the
    /// edited copy. `id` and timestamps are not diffable through this
    /// flow.
    pub fn diff(original: &User, edited: &User) -> Self {
        Self {
            firstname: changed(&original.firstname, &edited.firstname),
            surname: changed(&original.surname, &edited.surname),
            email: changed(&original.email, &edited.email),
            role: (original.role != edited.role).then_some(edited.role),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.firstname.is_none()
            && self.surname.is_none()
            && self.email.is_none()
            && self.role.is_none()
    }

    /// Names of the fields present in the patch, in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.firstname.is_some() {
            names.push("firstname");
        }
        if self.surname.is_some() {
            names.push("surname");
        }
        if self.email.is_some() {
            names.push("email");
        }
        if self.role.is_some() {
            names.push("role");
        }
        names
    }
}

/// Registration payload for admin-initiated account creation.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub id: String,
    pub password: String,
    pub firstname: String,
    pub surname: String,
    pub email: String,
    pub role: Role,
}

fn changed(original: &str, edited: &str) -> Option<String> {
    (original != edited).then(|| edited.to_string())
}

pub(crate) fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ModelError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}
