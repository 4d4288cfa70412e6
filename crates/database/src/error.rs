use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Database query failed: {0}")]
    ConnectionError(#[from] sqlx::Error),

    #[error("Failed to map a stored row onto a domain record: {0}")]
    Mapping(#[from] core_types::CoreError),

    #[error("Unit {0} was not found in the database.")]
    UnitNotFound(Uuid),

    #[error("A lookback of {0} days reaches past the supported date range.")]
    WindowOutOfRange(u32),
}
