//! # PropTech Core Types
//!
//! Immutable value records for the property domain: the parcel → building → unit
//! ownership chain, leases, meters and their readings, permits and title records.
//!
//! Records are read-only snapshots built by the data adapter for one request and
//! discarded afterwards. Cross-cutting records (meters, permits, titles) point at
//! their owner through the [`Scope`] tagged variant.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{LeaseStatus, PermitStatus, ScopeKind};
pub use error::CoreError;
pub use structs::{
    building_age_years, Building, Lease, Meter, MeterReading, Parcel, Permit, Scope, TitleRecord,
    Unit, CLEAN_LIEN_STATUSES, LIEN_STATUS_KEY,
};
