//! # PropTech Reporter
//!
//! Assembles the property report for one unit: fetch from a `PropertySource`,
//! compute with the `analytics` crate, hand back a serializable document.
//!
//! The pipeline is linear. Each fetch feeds the next, and only the unit chain
//! is mandatory: a missing permit, title, meter or reading degrades to `None`,
//! `false` or `0.0` in the corresponding report field.

use crate::error::ReportError;
use analytics::securitization::tape_qc_flags;
use analytics::{LosPackage, PropertyReport, PropertySnapshot, ReportAssumptions, ReportEngine, TapeQcFlags};
use chrono::NaiveDate;
use core_types::{MeterReading, Unit};
use serde::Serialize;
use uuid::Uuid;

pub mod error;
pub mod source;

pub use source::PropertySource;

/// Everything needed to produce one report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRequest {
    pub unit_id: Uuid,
    pub assumptions: ReportAssumptions,
}

/// The underwriting export together with its loan tape QC flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LosReport {
    pub package: LosPackage,
    pub tape_qc: TapeQcFlags,
}

/// The report assembler.
#[derive(Debug, Default)]
pub struct Reporter {
    engine: ReportEngine,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves, computes and assembles the report for `request.unit_id`.
    pub async fn run<S>(
        &self,
        source: &S,
        request: &ReportRequest,
        today: NaiveDate,
    ) -> Result<PropertyReport, ReportError>
    where
        S: PropertySource + ?Sized,
    {
        let snapshot = self.resolve(source, request).await?;
        let report = self.engine.calculate(&snapshot, &request.assumptions, today)?;
        tracing::info!(
            unit_id = %request.unit_id,
            noi_annual = report.valuation.noi_annual,
            "Property report assembled."
        );
        Ok(report)
    }

    /// Builds the LOS underwriting package and tape QC flags for a unit.
    pub async fn los_package<S>(
        &self,
        source: &S,
        unit_id: Uuid,
        avm_value: Option<f64>,
        valuation_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<LosReport, ReportError>
    where
        S: PropertySource + ?Sized,
    {
        let (unit, building, parcel) = source.fetch_unit_core(unit_id).await?;
        let permit = source.fetch_latest_permit_for_building(building.id).await?;
        let title = source.fetch_latest_title(unit.id, parcel.id).await?;

        let package = LosPackage::build(
            &unit,
            &building,
            &parcel,
            title.as_ref(),
            permit.as_ref(),
            avm_value,
            valuation_date,
            today,
        );
        let tape_qc = tape_qc_flags(
            valuation_date,
            permit.as_ref().and_then(|p| p.completed_on),
            package.title.clean,
            today,
        );
        if tape_qc.any() {
            tracing::warn!(%unit_id, ?tape_qc, "Unit fails loan tape QC.");
        }
        Ok(LosReport { package, tape_qc })
    }

    /// Resolves the unit chain and every record attached to it.
    async fn resolve<S>(&self, source: &S, request: &ReportRequest) -> Result<PropertySnapshot, ReportError>
    where
        S: PropertySource + ?Sized,
    {
        // 1. Chain
        let (unit, building, parcel) = source.fetch_unit_core(request.unit_id).await?;

        // 2. Attached records
        let leases = source.fetch_active_leases(unit.id).await?;
        let occupancy_permit = source.fetch_latest_permit_for_building(building.id).await?;
        if occupancy_permit.is_none() {
            tracing::debug!(building_id = %building.id, "No occupancy permit on record.");
        }
        let title = source.fetch_latest_title(unit.id, parcel.id).await?;
        let electricity_readings = self
            .resolve_electricity(source, &unit, request.assumptions.window_days)
            .await?;

        Ok(PropertySnapshot {
            unit,
            building,
            parcel,
            leases,
            occupancy_permit,
            title,
            electricity_readings,
        })
    }

    /// Readings of the unit's first electricity meter, if it has one.
    async fn resolve_electricity<S>(
        &self,
        source: &S,
        unit: &Unit,
        window_days: u32,
    ) -> Result<Vec<MeterReading>, ReportError>
    where
        S: PropertySource + ?Sized,
    {
        let meters = source.fetch_unit_meters(unit.id).await?;
        match meters.iter().find(|m| m.is_electricity()) {
            Some(meter) => source.fetch_readings(meter.id, window_days).await,
            None => {
                tracing::debug!(unit_id = %unit.id, "Unit has no electricity meter.");
                Ok(Vec::new())
            }
        }
    }
}
