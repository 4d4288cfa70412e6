//! Fraud, anomaly and governance flags.

pub const DEFAULT_AREA_TOLERANCE_M2: f64 = 1.0;
pub const DEFAULT_MIN_KWH_PER_DAY: f64 = 1.0;

/// Flags a unit whose leasable area exceeds the building's built-up area by
/// more than `tolerance_m2`.
pub fn area_sanity_flag(nla_m2: f64, bua_m2: f64, tolerance_m2: f64) -> bool {
    nla_m2 > bua_m2 + tolerance_m2
}

/// Flags a unit reported as occupied while drawing almost no energy.
pub fn occupancy_vs_usage_flag(is_occupied: bool, avg_kwh_per_day: f64, min_kwh_threshold: f64) -> bool {
    is_occupied && avg_kwh_per_day < min_kwh_threshold
}
