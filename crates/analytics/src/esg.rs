//! ESG, energy and resilience.

pub const DEFAULT_HAZARD_THRESHOLD_M: f64 = 500.0;

/// Scope-2 proxy: annual energy intensity times the grid emission factor.
pub fn carbon_intensity_kgco2e_per_m2_year(kwh_per_m2_year: f64, grid_factor_kgco2e_per_kwh: f64) -> f64 {
    kwh_per_m2_year * grid_factor_kgco2e_per_kwh
}

pub fn water_intensity_m3_per_m2_year(m3_per_year: f64, nla_m2: f64) -> f64 {
    if nla_m2 <= 0.0 { 0.0 } else { m3_per_year / nla_m2 }
}

/// Linear distance score: `1.0` at or beyond `threshold_m`, ramping down to
/// `0.0` at the hazard itself.
pub fn simple_hazard_distance_score(distance_m: f64, threshold_m: f64) -> f64 {
    if distance_m >= threshold_m {
        return 1.0;
    }
    (distance_m / threshold_m).max(0.0)
}
