//! Medicine catalog records.
//!
//! Medicines are created by an external ingestion pipeline and only
//! reviewed here, so the record is read-mostly: a handful of packaging
//! fields are editable on the detail screen, the rest is display data.
//! [`RawMedicine`] is the wire shape; [`Medicine`] the validated form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::MedicineStatus;
use crate::error::{ModelError, Result};
use crate::user::parse_timestamp;

/// A validated medicine record.
///
/// `metadata_id` is the unique identifier; `product_name` doubles as
/// the human-facing lookup key used by detail routes. A missing or
/// empty `category` is kept as `None` and surfaces downstream as the
/// synthetic "No Category" bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub metadata_id: String,
    pub product_name: String,
    pub category: Option<String>,
    pub intake_method: String,
    pub manufacturer: String,
    pub manufacturing_country: String,
    pub country_registration: String,
    pub barcode: String,
    pub type_packaging: String,
    pub status: MedicineStatus,
    pub created_at: DateTime<Utc>,
    /// Ordered image references; URL construction happens elsewhere.
    pub images_location: Vec<String>,
    // Read-only display data.
    pub product_dosage: String,
    pub product_active_ingredient: String,
}

impl Medicine {
    /// Label for the category bucket this record falls into.
    pub fn category_bucket(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => NO_CATEGORY,
        }
    }
}

/// Synthetic bucket for records without a category.
pub const NO_CATEGORY: &str = "No Category";

/// Wire shape for a medicine record.
///
/// Everything optional-ish on the wire stays a plain `Option<String>`
/// here and is normalized during `parse`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMedicine {
    pub metadata_id: String,
    pub product_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub intake_method: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub manufacturing_country: Option<String>,
    #[serde(default)]
    pub country_registration: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub type_packaging: Option<String>,
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub images_location: Vec<String>,
    #[serde(default)]
    pub product_dosage: Option<String>,
    #[serde(default)]
    pub product_active_ingredient: Option<String>,
}

impl RawMedicine {
    pub fn parse(self) -> Result<Medicine> {
        if self.metadata_id.is_empty() {
            return Err(ModelError::MissingField("metadata_id"));
        }
        if self.product_name.is_empty() {
            return Err(ModelError::MissingField("product_name"));
        }
        Ok(Medicine {
            status: self.status.parse()?,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            category: self.category.filter(|c| !c.is_empty()),
            intake_method: self.intake_method.unwrap_or_default(),
            manufacturer: self.manufacturer.unwrap_or_default(),
            manufacturing_country: self.manufacturing_country.unwrap_or_default(),
            country_registration: self.country_registration.unwrap_or_default(),
            barcode: self.barcode.unwrap_or_default(),
            type_packaging: self.type_packaging.unwrap_or_default(),
            images_location: self.images_location,
            product_dosage: self.product_dosage.unwrap_or_default(),
            product_active_ingredient: self.product_active_ingredient.unwrap_or_default(),
            metadata_id: self.metadata_id,
            product_name: self.product_name,
        })
    }
}

/// Partial update payload: only changed fields are present.
///
/// Status is deliberately absent; status changes go through their own
/// endpoint with their own guard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MedicinePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intake_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturing_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_registration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_packaging: Option<String>,
}

impl MedicinePatch {
    /// Field-level diff between the originally loaded record and the
    /// edited copy.
    pub fn diff(original: &Medicine, edited: &Medicine) -> Self {
        Self {
            product_name: changed(&original.product_name, &edited.product_name),
            category: (original.category != edited.category)
                .then(|| edited.category.clone().unwrap_or_default()),
            intake_method: changed(&original.intake_method, &edited.intake_method),
            manufacturer: changed(&original.manufacturer, &edited.manufacturer),
            manufacturing_country: changed(
                &original.manufacturing_country,
                &edited.manufacturing_country,
            ),
            country_registration: changed(
                &original.country_registration,
                &edited.country_registration,
            ),
            barcode: changed(&original.barcode, &edited.barcode),
            type_packaging: changed(&original.type_packaging, &edited.type_packaging),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }

    /// Names of the fields present in the patch, in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.product_name.is_some() {
            names.push("product_name");
        }
        if self.category.is_some() {
            names.push("category");
        }
        if self.intake_method.is_some() {
            names.push("intake_method");
        }
        if self.manufacturer.is_some() {
            names.push("manufacturer");
        }
        if self.manufacturing_country.is_some() {
            names.push("manufacturing_country");
        }
        if self.country_registration.is_some() {
            names.push("country_registration");
        }
        if self.barcode.is_some() {
            names.push("barcode");
        }
        if self.type_packaging.is_some() {
            names.push("type_packaging");
        }
        names
    }
}

fn changed(original: &str, edited: &str) -> Option<String> {
    (original != edited).then(|| edited.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_raw(name: &str) -> RawMedicine {
        RawMedicine {
            metadata_id: format!("md-{name}"),
            product_name: name.to_string(),
            category: Some("Ampoules".to_string()),
            intake_method: Some("IM;IV".to_string()),
            manufacturer: Some("Medo".to_string()),
            manufacturing_country: Some("Cyprus".to_string()),
            country_registration: Some("Israel".to_string()),
            barcode: Some("7290015842006".to_string()),
            type_packaging: Some("Box".to_string()),
            status: "pending".to_string(),
            created_at: "2024-10-20T09:30:00Z".to_string(),
            images_location: vec!["meds/cefotaxime/1.jpg".to_string()],
            product_dosage: Some("1g".to_string()),
            product_active_ingredient: Some("Cefotaxime".to_string()),
        }
    }

    #[test]
    fn raw_medicine_parses() {
        let med = sample_raw("Cefotaxime Medo").parse().unwrap();
        assert_eq!(med.status, MedicineStatus::Pending);
        assert_eq!(med.category_bucket(), "Ampoules");
    }

    #[test]
    fn empty_category_maps_to_no_category_bucket() {
        let mut raw = sample_raw("Ibuprofen");
        raw.category = Some(String::new());
        let med = raw.parse().unwrap();
        assert_eq!(med.category, None);
        assert_eq!(med.category_bucket(), NO_CATEGORY);
    }

    #[test]
    fn diff_detects_category_change_only() {
        let original = sample_raw("Cefotaxime Medo").parse().unwrap();
        let mut edited = original.clone();
        edited.category = Some("Y".to_string());

        let patch = MedicinePatch::diff(&original, &edited);
        assert_eq!(patch.field_names(), vec!["category"]);
    }

    #[test]
    fn diff_of_unchanged_record_is_empty() {
        let original = sample_raw("Cefotaxime Medo").parse().unwrap();
        assert!(MedicinePatch::diff(&original, &original.clone()).is_empty());
    }
}
