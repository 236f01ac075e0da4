pub mod criteria;
pub mod filter;
pub mod select;
pub mod sort;

pub use criteria::{DateWindow, GroupFilter, MedicineFilter, MedicineOrder, UserFilter, UserOrder};
pub use filter::{filter_medicines, filter_users, medicine_matches, user_matches};
pub use select::{MedicineSelection, UserSelection};
pub use sort::{sort_medicines, sort_users};

#[cfg(test)]
pub(crate) mod testkit {
    use chrono::{DateTime, Utc};
    use medrev_model::{Medicine, MedicineStatus, Role, User};

    pub fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            firstname: format!("First-{id}"),
            surname: format!("Last-{id}"),
            email: format!("{id}@pharmacy.example"),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn medicine(name: &str, category: Option<&str>, created_at: DateTime<Utc>) -> Medicine {
        Medicine {
            metadata_id: format!("md-{name}"),
            product_name: name.to_string(),
            category: category.map(str::to_string),
            intake_method: "IM;IV".to_string(),
            manufacturer: "Medo".to_string(),
            manufacturing_country: "Cyprus".to_string(),
            country_registration: "Israel".to_string(),
            barcode: "7290015842006".to_string(),
            type_packaging: "Box".to_string(),
            status: MedicineStatus::Pending,
            created_at,
            images_location: vec![],
            product_dosage: "1g".to_string(),
            product_active_ingredient: String::new(),
        }
    }
}
