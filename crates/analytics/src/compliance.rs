//! Compliance, permits and legal certainty.

use chrono::NaiveDate;
use core_types::{Permit, TitleRecord};
use std::collections::HashMap;

/// Days elapsed between the permit's completion and `today`.
///
/// `None` when there is no permit or it has not been completed.
pub fn days_since_last_occupancy(permit: Option<&Permit>, today: NaiveDate) -> Option<i64> {
    let completed_on = permit?.completed_on?;
    Some((today - completed_on).num_days())
}

/// `true` when a title exists and its lien status is `free` or `released`.
pub fn title_clean_flag_from_record(title: Option<&TitleRecord>) -> bool {
    title.is_some_and(TitleRecord::is_clean)
}

/// `true` when `actual_use` is not among the uses allowed for `zoning_code`.
///
/// A zoning code missing from `allowed_map` allows nothing, so every use is
/// reported as a mismatch.
pub fn zoning_mismatch(
    actual_use: &str,
    zoning_code: &str,
    allowed_map: &HashMap<String, Vec<String>>,
) -> bool {
    !allowed_map
        .get(zoning_code)
        .is_some_and(|allowed| allowed.iter().any(|u| u == actual_use))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use core_types::{PermitStatus, Scope};
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn permit(completed_on: Option<NaiveDate>) -> Permit {
        Permit {
            id: Uuid::new_v4(),
            scope: Scope::Building(Uuid::new_v4()),
            kind: "occupancy".to_string(),
            status: PermitStatus::Completed,
            issued_on: NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
            completed_on,
            permit_no: "P-77".to_string(),
        }
    }

    fn title(lien_status: &str) -> TitleRecord {
        let mut encumbrance = BTreeMap::new();
        encumbrance.insert("lien_status".to_string(), lien_status.to_string());
        TitleRecord::new(
            Uuid::new_v4(),
            Scope::Parcel(Uuid::new_v4()),
            "owner".to_string(),
            "D-9".to_string(),
            encumbrance,
            NaiveDate::from_ymd_opt(2018, 7, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_days_since_occupancy() {
        assert_eq!(days_since_last_occupancy(None, today()), None);
        assert_eq!(days_since_last_occupancy(Some(&permit(None)), today()), None);
        let p = permit(Some(today() - Duration::days(10)));
        assert_eq!(days_since_last_occupancy(Some(&p), today()), Some(10));
    }

    #[test]
    fn test_title_clean_flag() {
        assert!(!title_clean_flag_from_record(None));
        assert!(title_clean_flag_from_record(Some(&title("FREE"))));
        assert!(title_clean_flag_from_record(Some(&title("released"))));
        assert!(!title_clean_flag_from_record(Some(&title("mortgaged"))));
    }

    #[test]
    fn test_zoning_mismatch() {
        let mut allowed = HashMap::new();
        allowed.insert(
            "R2".to_string(),
            vec!["residential".to_string(), "home_office".to_string()],
        );
        assert!(!zoning_mismatch("residential", "R2", &allowed));
        assert!(zoning_mismatch("industrial", "R2", &allowed));
        assert!(zoning_mismatch("residential", "C1", &allowed));
    }
}
