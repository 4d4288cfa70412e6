//! Capital-markets and securitization checks.

use chrono::NaiveDate;
use serde::Serialize;

/// A permit completed more than this many days ago is considered stale.
pub const PERMIT_STALE_AFTER_DAYS: i64 = 3650;

const DAYS_PER_YEAR: f64 = 365.25;

/// Loan tape eligibility flags. Each flag is `true` when the check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TapeQcFlags {
    pub valuation_missing: bool,
    pub permit_stale: bool,
    pub title_not_clean: bool,
}

impl TapeQcFlags {
    pub fn any(&self) -> bool {
        self.valuation_missing || self.permit_stale || self.title_not_clean
    }
}

/// Computes the three independent tape QC flags as of `today`.
pub fn tape_qc_flags(
    valuation_date: Option<NaiveDate>,
    permit_completed_on: Option<NaiveDate>,
    title_clean: bool,
    today: NaiveDate,
) -> TapeQcFlags {
    let permit_stale = match permit_completed_on {
        None => true,
        Some(completed_on) => (today - completed_on).num_days() > PERMIT_STALE_AFTER_DAYS,
    };
    TapeQcFlags {
        valuation_missing: valuation_date.is_none(),
        permit_stale,
        title_not_clean: !title_clean,
    }
}

/// Weighted average life of a principal schedule, in years.
///
/// Time is measured from the earliest date in the schedule, so the result is
/// independent of the order of `schedule`. Returns `0.0` for an empty schedule
/// or when total principal is not positive.
pub fn weighted_average_life(schedule: &[(NaiveDate, f64)]) -> f64 {
    let Some(t0) = schedule.iter().map(|(d, _)| *d).min() else {
        return 0.0;
    };
    let total_principal: f64 = schedule.iter().map(|(_, p)| p).sum();
    if total_principal <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = schedule
        .iter()
        .map(|(d, p)| (*d - t0).num_days() as f64 / DAYS_PER_YEAR * p)
        .sum();
    weighted / total_principal
}
