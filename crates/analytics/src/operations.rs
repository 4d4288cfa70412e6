//! Operations, maintenance and CapEx.

use chrono::NaiveDate;
use core_types::{MeterReading, Unit};
use std::collections::BTreeMap;

/// Average daily energy intensity (kWh/m²/day) from a series of daily totals.
///
/// Returns `0.0` when the unit has no leasable area or the series is empty.
pub fn kwh_per_m2_day_from_series(unit: &Unit, readings_daily_kwh: &[f64]) -> f64 {
    if unit.nla_m2 <= 0.0 || readings_daily_kwh.is_empty() {
        return 0.0;
    }
    let mean = readings_daily_kwh.iter().sum::<f64>() / readings_daily_kwh.len() as f64;
    mean / unit.nla_m2
}

/// Sums raw readings per UTC calendar day, in day order.
///
/// Days without readings are absent rather than zero.
pub fn daily_totals(readings: &[MeterReading]) -> Vec<f64> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in readings {
        *by_day.entry(r.ts.date_naive()).or_insert(0.0) += r.value;
    }
    by_day.into_values().collect()
}

/// Mean time to repair, in hours per closed ticket.
pub fn mttr(total_repair_time_hours: f64, tickets_closed: u32) -> f64 {
    if tickets_closed == 0 {
        0.0
    } else {
        total_repair_time_hours / f64::from(tickets_closed)
    }
}

pub fn opex_per_unit(total_opex_monthly: f64, unit_count: u32) -> f64 {
    if unit_count == 0 {
        0.0
    } else {
        total_opex_monthly / f64::from(unit_count)
    }
}
