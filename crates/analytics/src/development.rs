//! Development and site selection.

/// Floor area ratio: gross floor area over lot area.
pub fn far(gfa_m2: f64, lot_area_m2: f64) -> f64 {
    if lot_area_m2 <= 0.0 { 0.0 } else { gfa_m2 / lot_area_m2 }
}

/// Site coverage: building footprint over lot area.
pub fn coverage_ratio(footprint_m2: f64, lot_area_m2: f64) -> f64 {
    if lot_area_m2 <= 0.0 {
        0.0
    } else {
        footprint_m2 / lot_area_m2
    }
}

/// Parking spaces per unit.
pub fn parking_ratio(spaces: u32, units_count: u32) -> f64 {
    if units_count == 0 {
        0.0
    } else {
        f64::from(spaces) / f64::from(units_count)
    }
}
