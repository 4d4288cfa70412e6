use crate::error::ReportError;
use async_trait::async_trait;
use core_types::{Building, Lease, Meter, MeterReading, Parcel, Permit, TitleRecord, Unit};
use database::DbRepository;
use uuid::Uuid;

/// Resolve-by-id access to the property records a report needs.
///
/// `fetch_unit_core` must fail with `ReportError::UnitNotFound` when the unit
/// does not exist. Every other method reports absence as `None` or an empty
/// `Vec`, never as an error.
#[async_trait]
pub trait PropertySource: Send + Sync {
    async fn fetch_unit_core(&self, unit_id: Uuid) -> Result<(Unit, Building, Parcel), ReportError>;

    async fn fetch_active_leases(&self, unit_id: Uuid) -> Result<Vec<Lease>, ReportError>;

    /// Latest occupancy or completion permit on the building.
    async fn fetch_latest_permit_for_building(&self, building_id: Uuid) -> Result<Option<Permit>, ReportError>;

    /// Latest title, unit scope preferred over parcel scope.
    async fn fetch_latest_title(&self, unit_id: Uuid, parcel_id: Uuid) -> Result<Option<TitleRecord>, ReportError>;

    async fn fetch_unit_meters(&self, unit_id: Uuid) -> Result<Vec<Meter>, ReportError>;

    /// Readings inside the lookback window, ordered by time ascending.
    async fn fetch_readings(&self, meter_id: Uuid, days_back: u32) -> Result<Vec<MeterReading>, ReportError>;
}

#[async_trait]
impl PropertySource for DbRepository {
    async fn fetch_unit_core(&self, unit_id: Uuid) -> Result<(Unit, Building, Parcel), ReportError> {
        Ok(DbRepository::fetch_unit_core(self, unit_id).await?)
    }

    async fn fetch_active_leases(&self, unit_id: Uuid) -> Result<Vec<Lease>, ReportError> {
        Ok(DbRepository::fetch_active_leases(self, unit_id).await?)
    }

    async fn fetch_latest_permit_for_building(&self, building_id: Uuid) -> Result<Option<Permit>, ReportError> {
        Ok(DbRepository::fetch_latest_permit_for_building(self, building_id).await?)
    }

    async fn fetch_latest_title(&self, unit_id: Uuid, parcel_id: Uuid) -> Result<Option<TitleRecord>, ReportError> {
        Ok(DbRepository::fetch_latest_title(self, unit_id, parcel_id).await?)
    }

    async fn fetch_unit_meters(&self, unit_id: Uuid) -> Result<Vec<Meter>, ReportError> {
        Ok(DbRepository::fetch_unit_meters(self, unit_id).await?)
    }

    async fn fetch_readings(&self, meter_id: Uuid, days_back: u32) -> Result<Vec<MeterReading>, ReportError> {
        Ok(DbRepository::fetch_readings(self, meter_id, days_back).await?)
    }
}
