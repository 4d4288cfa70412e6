use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Unit {unit_id} belongs to building {expected}, but building {actual} was supplied")]
    UnitBuildingMismatch {
        unit_id: Uuid,
        expected: Uuid,
        actual: Uuid,
    },

    #[error("Building {building_id} sits on parcel {expected}, but parcel {actual} was supplied")]
    BuildingParcelMismatch {
        building_id: Uuid,
        expected: Uuid,
        actual: Uuid,
    },

    #[error("Invalid report assumption: {0}")]
    InvalidAssumption(String),
}
