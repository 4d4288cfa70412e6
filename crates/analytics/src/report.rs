use chrono::NaiveDate;
use serde::Serialize;

/// The property metrics report for a single unit.
///
/// Field names are part of the output contract and must stay stable. An
/// infinite `implied_value` (non-positive cap rate) serializes as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyReport {
    pub parcel: ParcelSection,
    pub building: BuildingSection,
    pub unit: UnitSection,
    pub leases: LeaseSection,
    pub valuation: ValuationSection,
    pub compliance: ComplianceSection,
    pub energy: EnergySection,
    #[serde(rename = "_meta")]
    pub meta: ReportMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParcelSection {
    pub zoning: String,
    pub muni_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingSection {
    pub age_years: u32,
    pub floors: i32,
    pub bua_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitSection {
    pub use_type: String,
    pub nla_m2: f64,
    pub floor_no: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaseSection {
    pub active_count: usize,
    pub rent_monthly_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationSection {
    pub assumed_cap_rate: f64,
    pub noi_annual: f64,
    pub implied_value: f64,
    /// Only present when a positive loan balance was supplied.
    pub ltv_from_input_balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceSection {
    pub days_since_occupancy: Option<i64>,
    pub title_clean: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergySection {
    pub kwh_per_m2_day: f64,
    pub window_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMeta {
    /// Serialized as an ISO-8601 date.
    pub generated_on: NaiveDate,
}
