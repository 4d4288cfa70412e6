//! Leasing and revenue management.

use core_types::{Lease, Unit};
use std::collections::HashSet;

/// Sum of monthly rent over leases whose status is active.
///
/// Any other status is ignored even when passed in, and lease dates are not
/// consulted.
pub fn rent_roll_total(leases: &[Lease]) -> f64 {
    leases
        .iter()
        .filter(|l| l.status.is_active())
        .map(|l| l.rent_monthly)
        .sum()
}

/// Share of distinct units that carry at least one active lease.
///
/// Leases on units outside `units` do not count. Returns `0.0` for no units.
pub fn occupancy_rate(units: &[Unit], leases: &[Lease]) -> f64 {
    let unit_ids: HashSet<_> = units.iter().map(|u| u.id).collect();
    if unit_ids.is_empty() {
        return 0.0;
    }
    let occupied = leases
        .iter()
        .filter(|l| l.status.is_active())
        .map(|l| l.unit_id)
        .collect::<HashSet<_>>()
        .intersection(&unit_ids)
        .count();
    occupied as f64 / unit_ids.len() as f64
}

/// Mean days-to-lease over historical vacancies.
pub fn avg_time_to_lease(days_vacant: &[u32]) -> f64 {
    if days_vacant.is_empty() {
        return 0.0;
    }
    days_vacant.iter().map(|d| f64::from(*d)).sum::<f64>() / days_vacant.len() as f64
}
