use crate::enums::{LeaseStatus, PermitStatus, ScopeKind};
use crate::error::CoreError;
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Encumbrance key that carries the lien state of a title.
pub const LIEN_STATUS_KEY: &str = "lien_status";

/// Lien states that leave a title clean.
pub const CLEAN_LIEN_STATUSES: [&str; 2] = ["free", "released"];

/// A polymorphic attachment point for meters, permits and title records.
///
/// The discriminant names the owning record type and the payload is that
/// record's identifier. It never implies ownership of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "scope_id", rename_all = "lowercase")]
pub enum Scope {
    Parcel(Uuid),
    Building(Uuid),
    Unit(Uuid),
}

impl Scope {
    pub fn new(kind: ScopeKind, id: Uuid) -> Self {
        match kind {
            ScopeKind::Parcel => Scope::Parcel(id),
            ScopeKind::Building => Scope::Building(id),
            ScopeKind::Unit => Scope::Unit(id),
        }
    }

    /// Builds a scope from its stored `(scope, scope_id)` column pair.
    pub fn from_parts(kind: &str, id: Uuid) -> Result<Self, CoreError> {
        Ok(Self::new(kind.parse()?, id))
    }

    pub fn kind(&self) -> ScopeKind {
        match self {
            Scope::Parcel(_) => ScopeKind::Parcel,
            Scope::Building(_) => ScopeKind::Building,
            Scope::Unit(_) => ScopeKind::Unit,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Scope::Parcel(id) | Scope::Building(id) | Scope::Unit(id) => *id,
        }
    }
}

/// A land unit. Root of the ownership chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parcel {
    pub id: Uuid,
    pub muni_id: String,
    pub zoning: String,
    /// Boundary polygon as well-known text (EPSG:4326).
    pub geom_wkt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub id: Uuid,
    pub parcel_id: Uuid,
    pub year_built: i32,
    pub structure: String,
    pub floors: i32,
    pub bua_m2: f64,
}

impl Building {
    /// Age in whole years as of `as_of`, compared by calendar year only.
    pub fn age_years(&self, as_of: NaiveDate) -> u32 {
        building_age_years(self, as_of)
    }

    pub fn age_years_today(&self) -> u32 {
        building_age_years(self, Local::now().date_naive())
    }
}

/// Returns `max(0, as_of.year - year_built)`.
///
/// Month and day are ignored, so a building completed in December counts as
/// one year old on the following January 1st.
pub fn building_age_years(building: &Building, as_of: NaiveDate) -> u32 {
    (as_of.year() - building.year_built).max(0) as u32
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: Uuid,
    pub building_id: Uuid,
    pub use_type: String,
    /// Net leasable area in square metres.
    pub nla_m2: f64,
    pub floor_no: i32,
    pub bedrooms: Option<i32>,
    pub orientation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lease {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub tenant_hash: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent_monthly: f64,
    pub deposit: f64,
    pub status: LeaseStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Meter {
    pub id: Uuid,
    /// Either a building or a unit.
    #[serde(flatten)]
    pub scope: Scope,
    /// Utility type, e.g. `electricity` or `water`.
    pub meter_type: String,
    pub provider_acct: Option<String>,
}

impl Meter {
    /// Creates a meter, rejecting parcel scopes.
    pub fn new(
        id: Uuid,
        scope: Scope,
        meter_type: String,
        provider_acct: Option<String>,
    ) -> Result<Self, CoreError> {
        if let Scope::Parcel(_) = scope {
            return Err(CoreError::InvalidScope(
                "meter".to_string(),
                scope.kind().to_string(),
            ));
        }
        Ok(Self {
            id,
            scope,
            meter_type,
            provider_acct,
        })
    }

    pub fn is_electricity(&self) -> bool {
        self.meter_type == "electricity"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeterReading {
    pub meter_id: Uuid,
    pub ts: DateTime<Utc>,
    /// Units are implied by the meter type (kWh for electricity).
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permit {
    pub id: Uuid,
    #[serde(flatten)]
    pub scope: Scope,
    /// E.g. `occupancy` or `completion`.
    pub kind: String,
    pub status: PermitStatus,
    pub issued_on: NaiveDate,
    pub completed_on: Option<NaiveDate>,
    pub permit_no: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitleRecord {
    pub id: Uuid,
    /// Either a parcel or a unit.
    #[serde(flatten)]
    pub scope: Scope,
    pub owner_hash: String,
    pub deed_no: String,
    pub encumbrance: BTreeMap<String, String>,
    pub effective_on: NaiveDate,
}

impl TitleRecord {
    /// Creates a title record, rejecting building scopes.
    pub fn new(
        id: Uuid,
        scope: Scope,
        owner_hash: String,
        deed_no: String,
        encumbrance: BTreeMap<String, String>,
        effective_on: NaiveDate,
    ) -> Result<Self, CoreError> {
        if let Scope::Building(_) = scope {
            return Err(CoreError::InvalidScope(
                "title record".to_string(),
                scope.kind().to_string(),
            ));
        }
        Ok(Self {
            id,
            scope,
            owner_hash,
            deed_no,
            encumbrance,
            effective_on,
        })
    }

    pub fn lien_status(&self) -> Option<&str> {
        self.encumbrance.get(LIEN_STATUS_KEY).map(String::as_str)
    }

    /// A title is clean when its lien status is `free` or `released`, ignoring case.
    pub fn is_clean(&self) -> bool {
        let status = self.lien_status().unwrap_or_default().to_lowercase();
        CLEAN_LIEN_STATUSES.contains(&status.as_str())
    }
}

// Records with float fields compare and hash by bit pattern, so equal
// records always hash alike and a NaN field still equals itself.
macro_rules! value_identity {
    ($record:ty, |$r:ident| $key:expr) => {
        impl $record {
            fn value_key(&self) -> impl Eq + Hash + '_ {
                let $r = self;
                $key
            }
        }

        impl PartialEq for $record {
            fn eq(&self, other: &Self) -> bool {
                self.value_key() == other.value_key()
            }
        }

        impl Eq for $record {}

        impl Hash for $record {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.value_key().hash(state);
            }
        }
    };
}

value_identity!(Building, |b| (
    b.id,
    b.parcel_id,
    b.year_built,
    b.structure.as_str(),
    b.floors,
    b.bua_m2.to_bits(),
));

value_identity!(Unit, |u| (
    u.id,
    u.building_id,
    u.use_type.as_str(),
    u.nla_m2.to_bits(),
    u.floor_no,
    u.bedrooms,
    u.orientation.as_deref(),
));

value_identity!(Lease, |l| (
    l.id,
    l.unit_id,
    l.tenant_hash.as_str(),
    l.start_date,
    l.end_date,
    l.rent_monthly.to_bits(),
    l.deposit.to_bits(),
    l.status,
));

value_identity!(MeterReading, |m| (m.meter_id, m.ts, m.value.to_bits()));

#[cfg(test)]
mod tests {
    use super::*;

    fn building(year_built: i32) -> Building {
        Building {
            id: Uuid::new_v4(),
            parcel_id: Uuid::new_v4(),
            year_built,
            structure: "concrete".to_string(),
            floors: 4,
            bua_m2: 1200.0,
        }
    }

    fn title(encumbrance: &[(&str, &str)]) -> TitleRecord {
        TitleRecord::new(
            Uuid::new_v4(),
            Scope::Unit(Uuid::new_v4()),
            "owner".to_string(),
            "D-1".to_string(),
            encumbrance
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn age_uses_calendar_year_only() {
        let b = building(2015);
        let jan_first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(building_age_years(&b, jan_first), 9);
        assert_eq!(b.age_years(jan_first), 9);
    }

    #[test]
    fn age_is_never_negative() {
        let b = building(2030);
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert_eq!(building_age_years(&b, as_of), 0);
    }

    #[test]
    fn scope_round_trips_through_parts() {
        let id = Uuid::new_v4();
        let scope = Scope::from_parts("building", id).unwrap();
        assert_eq!(scope, Scope::Building(id));
        assert_eq!(scope.kind(), ScopeKind::Building);
        assert_eq!(scope.id(), id);
        assert!(Scope::from_parts("floor", id).is_err());
    }

    #[test]
    fn meter_cannot_attach_to_parcel() {
        let result = Meter::new(
            Uuid::new_v4(),
            Scope::Parcel(Uuid::new_v4()),
            "electricity".to_string(),
            None,
        );
        assert!(matches!(result, Err(CoreError::InvalidScope(_, _))));
    }

    #[test]
    fn title_cannot_attach_to_building() {
        let result = TitleRecord::new(
            Uuid::new_v4(),
            Scope::Building(Uuid::new_v4()),
            "owner".to_string(),
            "D-2".to_string(),
            BTreeMap::new(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn title_clean_is_case_insensitive() {
        assert!(title(&[("lien_status", "FREE")]).is_clean());
        assert!(title(&[("lien_status", "Released")]).is_clean());
        assert!(!title(&[("lien_status", "active")]).is_clean());
        assert!(!title(&[]).is_clean());
    }

    #[test]
    fn meter_serializes_scope_as_column_pair() {
        let unit_id = Uuid::nil();
        let meter = Meter::new(
            Uuid::nil(),
            Scope::Unit(unit_id),
            "electricity".to_string(),
            None,
        )
        .unwrap();
        let json = serde_json::to_value(&meter).unwrap();
        assert_eq!(json["scope"], "unit");
        assert_eq!(json["scope_id"], unit_id.to_string());
    }

    #[test]
    fn float_records_hash_by_value() {
        use std::collections::HashSet;

        let reading = MeterReading {
            meter_id: Uuid::nil(),
            ts: DateTime::from_timestamp(0, 0).unwrap(),
            value: 12.5,
        };
        let mut seen = HashSet::new();
        assert!(seen.insert(reading.clone()));
        assert!(!seen.insert(reading.clone()));
        assert!(seen.insert(MeterReading { value: 12.75, ..reading }));

        let nan = MeterReading {
            meter_id: Uuid::nil(),
            ts: DateTime::from_timestamp(0, 0).unwrap(),
            value: f64::NAN,
        };
        assert_eq!(nan, nan.clone());

        let original = building(2000);
        let buildings: HashSet<Building> = [original.clone(), original].into_iter().collect();
        assert_eq!(buildings.len(), 1);
    }
}
