use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Unit {0} was not found")]
    UnitNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(database::DbError),

    #[error("Report calculation error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
}

/// A unit that fails to resolve stays distinguishable from other data source failures.
impl From<database::DbError> for ReportError {
    fn from(err: database::DbError) -> Self {
        match err {
            database::DbError::UnitNotFound(unit_id) => ReportError::UnitNotFound(unit_id),
            other => ReportError::Database(other),
        }
    }
}
