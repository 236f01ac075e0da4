//! Filter Engine: pure predicates mapping (records, criteria, query)
//! to the subset a list surface shows.
//!
//! Free-text search is an OR across a few display fields, combined
//! with AND against the criteria filters; search narrows within the
//! filtered set. Both sides are pure predicates, so the combination
//! order is immaterial. An empty record set is an empty result, never
//! an error.

use chrono::{DateTime, Utc};
use medrev_model::{Medicine, User};

use crate::criteria::{MedicineFilter, UserFilter};

/// Whether one employee record passes the query and role criteria.
pub fn user_matches(user: &User, criteria: &UserFilter, query: &str) -> bool {
    matches_query(
        query,
        [
            user.firstname.as_str(),
            user.surname.as_str(),
            user.id.as_str(),
        ],
    ) && criteria.allows(user.role)
}

/// Whether one medicine record passes the query, group, and date
/// criteria. `now` is passed in so the recency windows stay pure.
pub fn medicine_matches(
    medicine: &Medicine,
    criteria: &MedicineFilter,
    query: &str,
    now: DateTime<Utc>,
) -> bool {
    let category = medicine.category.as_deref().unwrap_or("");
    matches_query(
        query,
        [
            medicine.product_name.as_str(),
            medicine.metadata_id.as_str(),
            category,
            medicine.manufacturer.as_str(),
        ],
    ) && criteria.group.allows(medicine.category_bucket())
        && matches_date(medicine, criteria, now)
}

/// `filter(records, criteria, query) -> subset` for the employee list.
pub fn filter_users(users: &[User], criteria: &UserFilter, query: &str) -> Vec<User> {
    users
        .iter()
        .filter(|user| user_matches(user, criteria, query))
        .cloned()
        .collect()
}

/// `filter(records, criteria, query) -> subset` for the medicine list.
pub fn filter_medicines(
    medicines: &[Medicine],
    criteria: &MedicineFilter,
    query: &str,
    now: DateTime<Utc>,
) -> Vec<Medicine> {
    medicines
        .iter()
        .filter(|medicine| medicine_matches(medicine, criteria, query, now))
        .cloned()
        .collect()
}

fn matches_query<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_date(medicine: &Medicine, criteria: &MedicineFilter, now: DateTime<Utc>) -> bool {
    match criteria.date {
        None => true,
        Some(window) => medicine.created_at >= now - window.duration(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::DateWindow;
    use crate::testkit::{medicine, user};
    use chrono::Duration;
    use medrev_model::Role;

    #[test]
    fn role_filter_keeps_matching_users_only() {
        let users = vec![user("1", Role::Pharm), user("2", Role::Admin)];
        let criteria = UserFilter {
            all: false,
            pharm: true,
            tech: false,
            admin: false,
        };

        let result = filter_users(&users, &criteria, "");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn three_week_window_excludes_thirty_day_old_record() {
        let now = Utc::now();
        let recent = medicine("Recent", Some("Ampoules"), now);
        let old = medicine("Old", Some("Ampoules"), now - Duration::days(30));

        let mut criteria = MedicineFilter::default();
        criteria.toggle_date(DateWindow::ThreeWeeks);

        let result = filter_medicines(&[recent, old], &criteria, "", now);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].product_name, "Recent");
    }

    #[test]
    fn query_is_case_insensitive_across_fields() {
        let users = vec![user("abc-1", Role::Tech)];
        assert_eq!(filter_users(&users, &UserFilter::default(), "ABC").len(), 1);
        assert_eq!(
            filter_users(&users, &UserFilter::default(), "nobody").len(),
            0
        );
    }

    #[test]
    fn missing_category_falls_into_no_category_bucket() {
        let now = Utc::now();
        let uncategorized = medicine("Mystery", None, now);

        let mut criteria = MedicineFilter::default();
        criteria.group.toggle(medrev_model::NO_CATEGORY);
        assert_eq!(
            filter_medicines(std::slice::from_ref(&uncategorized), &criteria, "", now).len(),
            1
        );

        criteria.group.select_all();
        criteria.group.toggle("Ampoules");
        assert_eq!(
            filter_medicines(&[uncategorized], &criteria, "", now).len(),
            0
        );
    }

    #[test]
    fn empty_records_produce_empty_result() {
        assert!(filter_users(&[], &UserFilter::default(), "x").is_empty());
    }
}
