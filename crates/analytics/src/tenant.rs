//! Tenant and occupant analytics.

/// Mean satisfaction score, skipping NaN entries (unanswered surveys).
pub fn avg_satisfaction(scores_1_to_5: &[f64]) -> f64 {
    let (sum, n) = scores_1_to_5
        .iter()
        .filter(|s| !s.is_nan())
        .fold((0.0, 0usize), |(sum, n), s| (sum + s, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

pub fn amenity_utilization(used_slots: u32, total_slots: u32) -> f64 {
    if total_slots == 0 {
        0.0
    } else {
        f64::from(used_slots) / f64::from(total_slots)
    }
}

pub fn cohort_churn_rate(ended_leases_in_cohort: u32, cohort_size: u32) -> f64 {
    if cohort_size == 0 {
        0.0
    } else {
        f64::from(ended_leases_in_cohort) / f64::from(cohort_size)
    }
}
