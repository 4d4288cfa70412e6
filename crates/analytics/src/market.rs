//! Market intelligence and strategy.

/// Median of the non-NaN values. `0.0` when none remain.
pub fn median(values: &[f64]) -> f64 {
    let mut vals: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if vals.is_empty() {
        return 0.0;
    }
    vals.sort_by(f64::total_cmp);
    let mid = vals.len() / 2;
    if vals.len() % 2 == 0 {
        (vals[mid - 1] + vals[mid]) / 2.0
    } else {
        vals[mid]
    }
}

pub fn neighborhood_median_rent(rents: &[f64]) -> f64 {
    median(rents)
}

/// Number of off-plan projects matched within the search radius.
pub fn supply_count<I: IntoIterator>(offplan_projects_within_radius: I) -> usize {
    offplan_projects_within_radius.into_iter().count()
}

pub fn turnover_rate(leases_ended: u32, total_units: u32) -> f64 {
    if total_units == 0 {
        0.0
    } else {
        f64::from(leases_ended) / f64::from(total_units)
    }
}
