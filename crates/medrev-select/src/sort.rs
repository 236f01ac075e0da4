//! Sort Engine: pure, stable ordering of list records.
//!
//! Every function copies before sorting. Callers (the memoizing
//! selection pipeline in particular) may hold the pre-sort reference
//! elsewhere, so the input sequence is never mutated. Sorting is
//! stable: records with equal keys keep their relative input order,
//! which matters because `created_at` is only second-granular and
//! collisions are routine.

use medrev_model::{Medicine, User};

use crate::criteria::{MedicineOrder, UserOrder};

/// Order employees lexicographically by `id`.
pub fn sort_users(users: &[User], order: UserOrder) -> Vec<User> {
    let mut sorted = users.to_vec();
    match order {
        UserOrder::Asc => sorted.sort_by(|a, b| a.id.cmp(&b.id)),
        UserOrder::Desc => sorted.sort_by(|a, b| b.id.cmp(&a.id)),
    }
    sorted
}

/// Order medicines chronologically by `created_at`.
pub fn sort_medicines(medicines: &[Medicine], order: MedicineOrder) -> Vec<Medicine> {
    let mut sorted = medicines.to_vec();
    match order {
        MedicineOrder::New => sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        MedicineOrder::Old => sorted.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{medicine, user};
    use chrono::{TimeZone, Utc};
    use medrev_model::Role;

    #[test]
    fn users_sort_lexicographically_both_ways() {
        let users = vec![
            user("b", Role::Tech),
            user("a", Role::Tech),
            user("c", Role::Tech),
        ];
        let asc: Vec<String> = sort_users(&users, UserOrder::Asc)
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(asc, vec!["a", "b", "c"]);

        let desc: Vec<String> = sort_users(&users, UserOrder::Desc)
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(desc, vec!["c", "b", "a"]);
    }

    #[test]
    fn ties_preserve_input_order() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let medicines = vec![medicine("a", None, ts), medicine("b", None, ts)];

        let sorted = sort_medicines(&medicines, MedicineOrder::New);
        let names: Vec<&str> = sorted.iter().map(|m| m.product_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn sorting_does_not_mutate_the_input() {
        let ts = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
        let medicines = vec![medicine("old", None, ts(1)), medicine("new", None, ts(2))];

        let sorted = sort_medicines(&medicines, MedicineOrder::New);
        assert_eq!(sorted[0].product_name, "new");
        // The caller's sequence is untouched.
        assert_eq!(medicines[0].product_name, "old");
    }
}
