use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a lease as recorded in the source system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaseStatus {
    Planned,
    Active,
    Expired,
    Defaulted,
}

impl LeaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaseStatus::Planned => "planned",
            LeaseStatus::Active => "active",
            LeaseStatus::Expired => "expired",
            LeaseStatus::Defaulted => "defaulted",
        }
    }

    /// Only a literally active lease contributes to rent roll and occupancy.
    pub fn is_active(&self) -> bool {
        matches!(self, LeaseStatus::Active)
    }
}

impl fmt::Display for LeaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaseStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(LeaseStatus::Planned),
            "active" => Ok(LeaseStatus::Active),
            "expired" => Ok(LeaseStatus::Expired),
            "defaulted" => Ok(LeaseStatus::Defaulted),
            other => Err(CoreError::InvalidInput(
                "lease status".to_string(),
                other.to_string(),
            )),
        }
    }
}

/// Permit state. Statuses outside the known set are kept verbatim in `Other`
/// so an unfamiliar value never blocks reading the permit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PermitStatus {
    Issued,
    Completed,
    Revoked,
    Expired,
    Other(String),
}

impl PermitStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PermitStatus::Issued => "issued",
            PermitStatus::Completed => "completed",
            PermitStatus::Revoked => "revoked",
            PermitStatus::Expired => "expired",
            PermitStatus::Other(status) => status,
        }
    }
}

impl fmt::Display for PermitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for PermitStatus {
    /// Known statuses match ignoring case and surrounding whitespace.
    fn from(status: String) -> Self {
        match status.trim().to_lowercase().as_str() {
            "issued" => PermitStatus::Issued,
            "completed" => PermitStatus::Completed,
            "revoked" => PermitStatus::Revoked,
            "expired" => PermitStatus::Expired,
            _ => PermitStatus::Other(status),
        }
    }
}

impl From<PermitStatus> for String {
    fn from(status: PermitStatus) -> Self {
        match status {
            PermitStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

/// The kind of record a cross-cutting entity (meter, permit, title) attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Parcel,
    Building,
    Unit,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Parcel => "parcel",
            ScopeKind::Building => "building",
            ScopeKind::Unit => "unit",
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScopeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parcel" => Ok(ScopeKind::Parcel),
            "building" => Ok(ScopeKind::Building),
            "unit" => Ok(ScopeKind::Unit),
            other => Err(CoreError::InvalidInput(
                "scope".to_string(),
                other.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lease_status_parses_lowercase_only() {
        assert_eq!("active".parse::<LeaseStatus>(), Ok(LeaseStatus::Active));
        assert!("Active".parse::<LeaseStatus>().is_err());
        assert!(LeaseStatus::Active.is_active());
        assert!(!LeaseStatus::Planned.is_active());
    }

    #[test]
    fn status_display_matches_stored_value() {
        assert_eq!(PermitStatus::Completed.to_string(), "completed");
        assert_eq!(LeaseStatus::Defaulted.to_string(), "defaulted");
        assert_eq!(ScopeKind::Building.to_string(), "building");
    }

    #[test]
    fn permit_status_keeps_unknown_values() {
        assert_eq!(PermitStatus::from("Completed".to_string()), PermitStatus::Completed);
        assert_eq!(
            PermitStatus::from("approved".to_string()),
            PermitStatus::Other("approved".to_string())
        );
        assert_eq!(PermitStatus::Other("approved".to_string()).to_string(), "approved");
    }

    #[test]
    fn unknown_scope_is_rejected() {
        let err = "floor".parse::<ScopeKind>().unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidInput("scope".to_string(), "floor".to_string())
        );
    }
}
