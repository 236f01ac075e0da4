pub mod enums;
pub mod error;
pub mod medicine;
pub mod similarity;
pub mod user;

pub use enums::{MedicineStatus, Role};
pub use error::{ModelError, Result};
pub use medicine::{Medicine, MedicinePatch, NO_CATEGORY, RawMedicine};
pub use similarity::{SimilarityMatch, SimilarityReport};
pub use user::{RawUser, Registration, User, UserPatch};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medicine_round_trips_through_json() {
        let raw: RawMedicine = serde_json::from_str(
            r#"{
                "metadata_id": "md-1",
                "product_name": "Cefotaxime Medo",
                "status": "pending",
                "created_at": "2024-10-20T09:30:00Z"
            }"#,
        )
        .expect("deserialize raw medicine");
        let med = raw.parse().expect("parse medicine");
        assert_eq!(med.category, None);

        let json = serde_json::to_string(&med).expect("serialize medicine");
        let round: Medicine = serde_json::from_str(&json).expect("deserialize medicine");
        assert_eq!(round, med);
    }
}
