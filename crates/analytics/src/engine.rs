use crate::compliance::{days_since_last_occupancy, title_clean_flag_from_record};
use crate::error::AnalyticsError;
use crate::leasing::{occupancy_rate, rent_roll_total};
use crate::lending::ltv;
use crate::operations::{daily_totals, kwh_per_m2_day_from_series};
use crate::report::{
    BuildingSection, ComplianceSection, EnergySection, LeaseSection, ParcelSection,
    PropertyReport, ReportMeta, UnitSection, ValuationSection,
};
use crate::valuation::{noi, value_from_cap};
use chrono::NaiveDate;
use core_types::{building_age_years, Building, Lease, MeterReading, Parcel, Permit, TitleRecord, Unit};
use serde::{Deserialize, Serialize};

/// Everything resolved from the data source for one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySnapshot {
    pub unit: Unit,
    pub building: Building,
    pub parcel: Parcel,
    pub leases: Vec<Lease>,
    /// Latest occupancy or completion permit on the building.
    pub occupancy_permit: Option<Permit>,
    /// Latest title, unit scope preferred over parcel scope.
    pub title: Option<TitleRecord>,
    /// Electricity readings inside the lookback window, oldest first.
    pub electricity_readings: Vec<MeterReading>,
}

/// Caller-supplied assumptions that shape the valuation section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportAssumptions {
    pub window_days: u32,
    pub assumed_cap_rate: f64,
    /// LTV is only computed when this is positive.
    pub loan_balance: f64,
}

impl Default for ReportAssumptions {
    fn default() -> Self {
        Self {
            window_days: 7,
            assumed_cap_rate: 0.06,
            loan_balance: 0.0,
        }
    }
}

impl ReportAssumptions {
    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if !self.assumed_cap_rate.is_finite() {
            return Err(AnalyticsError::InvalidAssumption(format!(
                "assumed_cap_rate must be a finite number, got {}",
                self.assumed_cap_rate
            )));
        }
        if !self.loan_balance.is_finite() {
            return Err(AnalyticsError::InvalidAssumption(format!(
                "loan_balance must be a finite number, got {}",
                self.loan_balance
            )));
        }
        Ok(())
    }
}

/// A stateless calculator that turns a resolved snapshot into a `PropertyReport`.
#[derive(Debug, Default)]
pub struct ReportEngine {}

impl ReportEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes every report section.
    ///
    /// # Arguments
    ///
    /// * `snapshot` - The unit, its building and parcel, and the records attached to them.
    /// * `assumptions` - Lookback window, market cap rate and optional loan balance.
    /// * `today` - Reference date for ages, permit recency and the report stamp.
    ///
    /// # Returns
    ///
    /// The report, or an `AnalyticsError` when the snapshot's ownership chain
    /// does not line up or an assumption is not a finite number.
    pub fn calculate(
        &self,
        snapshot: &PropertySnapshot,
        assumptions: &ReportAssumptions,
        today: NaiveDate,
    ) -> Result<PropertyReport, AnalyticsError> {
        assumptions.validate()?;
        self.check_chain(snapshot)?;

        let PropertySnapshot {
            unit,
            building,
            parcel,
            leases,
            ..
        } = snapshot;

        let valuation = self.calculate_valuation(leases, assumptions);
        let compliance = self.calculate_compliance(snapshot, today);
        let energy = self.calculate_energy(snapshot, assumptions.window_days);

        // A single-unit set: the rate is either 0.0 or 1.0.
        let occupancy = occupancy_rate(std::slice::from_ref(unit), leases);
        tracing::debug!(unit_id = %unit.id, occupancy, "Computed unit occupancy.");

        Ok(PropertyReport {
            parcel: ParcelSection {
                zoning: parcel.zoning.clone(),
                muni_id: parcel.muni_id.clone(),
            },
            building: BuildingSection {
                age_years: building_age_years(building, today),
                floors: building.floors,
                bua_m2: building.bua_m2,
            },
            unit: UnitSection {
                use_type: unit.use_type.clone(),
                nla_m2: unit.nla_m2,
                floor_no: unit.floor_no,
            },
            leases: LeaseSection {
                active_count: leases.iter().filter(|l| l.status.is_active()).count(),
                rent_monthly_total: rent_roll_total(leases),
            },
            valuation,
            compliance,
            energy,
            meta: ReportMeta { generated_on: today },
        })
    }

    fn check_chain(&self, snapshot: &PropertySnapshot) -> Result<(), AnalyticsError> {
        let PropertySnapshot {
            unit,
            building,
            parcel,
            ..
        } = snapshot;
        if unit.building_id != building.id {
            return Err(AnalyticsError::UnitBuildingMismatch {
                unit_id: unit.id,
                expected: unit.building_id,
                actual: building.id,
            });
        }
        if building.parcel_id != parcel.id {
            return Err(AnalyticsError::BuildingParcelMismatch {
                building_id: building.id,
                expected: building.parcel_id,
                actual: parcel.id,
            });
        }
        Ok(())
    }

    /// NOI assumes zero other income and zero opex.
    fn calculate_valuation(&self, leases: &[Lease], assumptions: &ReportAssumptions) -> ValuationSection {
        let monthly_rent = rent_roll_total(leases);
        let noi_annual = noi(monthly_rent, 0.0, 0.0);
        let implied_value = value_from_cap(noi_annual, assumptions.assumed_cap_rate);

        if implied_value.is_infinite() {
            tracing::warn!(
                cap_rate = assumptions.assumed_cap_rate,
                "Non-positive cap rate; implied value is unbounded."
            );
        }

        let ltv_from_input_balance =
            (assumptions.loan_balance > 0.0).then(|| ltv(assumptions.loan_balance, implied_value));

        ValuationSection {
            assumed_cap_rate: assumptions.assumed_cap_rate,
            noi_annual,
            implied_value,
            ltv_from_input_balance,
        }
    }

    fn calculate_compliance(&self, snapshot: &PropertySnapshot, today: NaiveDate) -> ComplianceSection {
        ComplianceSection {
            days_since_occupancy: days_since_last_occupancy(snapshot.occupancy_permit.as_ref(), today),
            title_clean: title_clean_flag_from_record(snapshot.title.as_ref()),
        }
    }

    fn calculate_energy(&self, snapshot: &PropertySnapshot, window_days: u32) -> EnergySection {
        let daily = daily_totals(&snapshot.electricity_readings);
        let kwh_per_m2_day = kwh_per_m2_day_from_series(&snapshot.unit, &daily);
        tracing::debug!(days = daily.len(), kwh_per_m2_day, "Aggregated electricity readings.");
        EnergySection {
            kwh_per_m2_day,
            window_days,
        }
    }
}
