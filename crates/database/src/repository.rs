use crate::DbError;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use core_types::{
    Building, Lease, Meter, MeterReading, Parcel, Permit, PermitStatus, Scope, TitleRecord, Unit,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use std::collections::BTreeMap;
use uuid::Uuid;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the property database. It encapsulates all SQL queries and the mapping
/// from stored rows onto `core_types` records.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// A row of the `v_unit_core` view: one unit joined with its building and parcel.
#[derive(Debug, Clone, FromRow)]
pub struct DbUnitCore {
    pub unit_id: Uuid,
    pub building_id: Uuid,
    pub parcel_id: Uuid,
    pub unit_use_type: String,
    pub nla_m2: Option<Decimal>,
    pub floor_no: Option<i32>,
    pub bedrooms: Option<i32>,
    pub orientation: Option<String>,
    pub year_built: Option<i32>,
    pub structure: Option<String>,
    pub floors: Option<i32>,
    pub bua_m2: Option<Decimal>,
    pub muni_id: String,
    pub zoning: String,
    pub parcel_geom_wkt: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbLease {
    pub id: Uuid,
    pub unit_id: Uuid,
    pub tenant_hash: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rent_monthly: Option<Decimal>,
    pub deposit: Option<Decimal>,
    pub status: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbPermit {
    pub id: Uuid,
    pub scope: String,
    pub scope_id: Uuid,
    pub kind: String,
    pub status: String,
    pub issued_on: NaiveDate,
    pub completed_on: Option<NaiveDate>,
    pub permit_no: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbTitleRecord {
    pub id: Uuid,
    pub scope: String,
    pub scope_id: Uuid,
    pub owner_hash: String,
    pub deed_no: String,
    pub encumbrance_json: Option<JsonValue>,
    pub effective_on: NaiveDate,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbMeter {
    pub id: Uuid,
    pub scope: String,
    pub scope_id: Uuid,
    pub meter_type: String,
    pub provider_acct: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbMeterReading {
    pub meter_id: Uuid,
    pub ts: DateTime<Utc>,
    pub value: Decimal,
}

/// NUMERIC columns are nullable in the source schema; absent values read as zero.
fn decimal_to_f64(value: Option<Decimal>) -> f64 {
    value.and_then(|d| d.to_f64()).unwrap_or(0.0)
}

/// Start of a `days_back` window ending at `now`.
fn window_start(now: DateTime<Utc>, days_back: u32) -> Result<DateTime<Utc>, DbError> {
    now.checked_sub_signed(Duration::days(i64::from(days_back)))
        .ok_or(DbError::WindowOutOfRange(days_back))
}

/// Flattens a stored encumbrance document into string attributes.
///
/// The column may hold a JSON object or a string containing one. Anything
/// else, including unparsable text, maps to an empty set of attributes.
/// Non-string attribute values keep their JSON text form.
pub fn encumbrance_from_json(value: Option<JsonValue>) -> BTreeMap<String, String> {
    let value = match value {
        Some(JsonValue::String(raw)) => serde_json::from_str(&raw).unwrap_or(JsonValue::Null),
        Some(other) => other,
        None => JsonValue::Null,
    };
    match value {
        JsonValue::Object(map) => map
            .into_iter()
            .map(|(k, v)| match v {
                JsonValue::String(s) => (k, s),
                other => (k, other.to_string()),
            })
            .collect(),
        _ => BTreeMap::new(),
    }
}

impl DbUnitCore {
    /// Splits the joined row into the unit → building → parcel chain.
    pub fn into_chain(self) -> (Unit, Building, Parcel) {
        let unit = Unit {
            id: self.unit_id,
            building_id: self.building_id,
            use_type: self.unit_use_type,
            nla_m2: decimal_to_f64(self.nla_m2),
            floor_no: self.floor_no.unwrap_or(0),
            bedrooms: self.bedrooms,
            orientation: self.orientation,
        };
        let building = Building {
            id: self.building_id,
            parcel_id: self.parcel_id,
            year_built: self.year_built.unwrap_or(0),
            structure: self.structure.unwrap_or_default(),
            floors: self.floors.unwrap_or(0),
            bua_m2: decimal_to_f64(self.bua_m2),
        };
        let parcel = Parcel {
            id: self.parcel_id,
            muni_id: self.muni_id,
            zoning: self.zoning,
            geom_wkt: self.parcel_geom_wkt.unwrap_or_default(),
        };
        (unit, building, parcel)
    }
}

impl TryFrom<DbLease> for Lease {
    type Error = DbError;

    fn try_from(row: DbLease) -> Result<Self, Self::Error> {
        Ok(Lease {
            id: row.id,
            unit_id: row.unit_id,
            tenant_hash: row.tenant_hash,
            start_date: row.start_date,
            end_date: row.end_date,
            rent_monthly: decimal_to_f64(row.rent_monthly),
            deposit: decimal_to_f64(row.deposit),
            status: row.status.parse()?,
        })
    }
}

impl TryFrom<DbPermit> for Permit {
    type Error = DbError;

    fn try_from(row: DbPermit) -> Result<Self, Self::Error> {
        Ok(Permit {
            id: row.id,
            scope: Scope::from_parts(&row.scope, row.scope_id)?,
            kind: row.kind,
            status: PermitStatus::from(row.status),
            issued_on: row.issued_on,
            completed_on: row.completed_on,
            permit_no: row.permit_no,
        })
    }
}

impl TryFrom<DbTitleRecord> for TitleRecord {
    type Error = DbError;

    fn try_from(row: DbTitleRecord) -> Result<Self, Self::Error> {
        let scope = Scope::from_parts(&row.scope, row.scope_id)?;
        Ok(TitleRecord::new(
            row.id,
            scope,
            row.owner_hash,
            row.deed_no,
            encumbrance_from_json(row.encumbrance_json),
            row.effective_on,
        )?)
    }
}

impl TryFrom<DbMeter> for Meter {
    type Error = DbError;

    fn try_from(row: DbMeter) -> Result<Self, Self::Error> {
        let scope = Scope::from_parts(&row.scope, row.scope_id)?;
        Ok(Meter::new(row.id, scope, row.meter_type, row.provider_acct)?)
    }
}

impl From<DbMeterReading> for MeterReading {
    fn from(row: DbMeterReading) -> Self {
        MeterReading {
            meter_id: row.meter_id,
            ts: row.ts,
            value: decimal_to_f64(Some(row.value)),
        }
    }
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolves a unit together with its building and parcel.
    ///
    /// Returns `DbError::UnitNotFound` when the unit does not exist.
    pub async fn fetch_unit_core(&self, unit_id: Uuid) -> Result<(Unit, Building, Parcel), DbError> {
        let row = sqlx::query_as::<_, DbUnitCore>(
            r#"
            SELECT unit_id, building_id, parcel_id, unit_use_type, nla_m2, floor_no,
                   bedrooms, orientation, year_built, structure, floors, bua_m2,
                   muni_id, zoning, parcel_geom_wkt
            FROM v_unit_core
            WHERE unit_id = $1
            "#,
        )
        .bind(unit_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::UnitNotFound(unit_id))?;

        Ok(row.into_chain())
    }

    /// Fetches the unit's active leases, newest first.
    pub async fn fetch_active_leases(&self, unit_id: Uuid) -> Result<Vec<Lease>, DbError> {
        let rows = sqlx::query_as::<_, DbLease>(
            r#"
            SELECT id, unit_id, tenant_hash, start_date, end_date, rent_monthly, deposit, status
            FROM lease
            WHERE unit_id = $1 AND status = 'active'
            ORDER BY start_date DESC
            "#,
        )
        .bind(unit_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Lease::try_from).collect()
    }

    /// Fetches the most recent occupancy or completion permit for a building.
    /// Completed permits sort ahead of open ones.
    pub async fn fetch_latest_permit_for_building(&self, building_id: Uuid) -> Result<Option<Permit>, DbError> {
        let row = sqlx::query_as::<_, DbPermit>(
            r#"
            SELECT id, scope, scope_id, kind, status, issued_on, completed_on, permit_no
            FROM permit
            WHERE scope = 'building' AND scope_id = $1
              AND kind IN ('occupancy', 'completion')
            ORDER BY completed_on DESC NULLS LAST, issued_on DESC NULLS LAST
            LIMIT 1
            "#,
        )
        .bind(building_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Permit::try_from).transpose()
    }

    /// Fetches the latest title record, preferring the unit's own title over
    /// the parcel's.
    pub async fn fetch_latest_title(&self, unit_id: Uuid, parcel_id: Uuid) -> Result<Option<TitleRecord>, DbError> {
        if let Some(title) = self.fetch_latest_title_in_scope(Scope::Unit(unit_id)).await? {
            return Ok(Some(title));
        }
        self.fetch_latest_title_in_scope(Scope::Parcel(parcel_id)).await
    }

    async fn fetch_latest_title_in_scope(&self, scope: Scope) -> Result<Option<TitleRecord>, DbError> {
        let row = sqlx::query_as::<_, DbTitleRecord>(
            r#"
            SELECT id, scope, scope_id, owner_hash, deed_no, encumbrance_json, effective_on
            FROM title_record
            WHERE scope = $1 AND scope_id = $2
            ORDER BY effective_on DESC
            LIMIT 1
            "#,
        )
        .bind(scope.kind().as_str())
        .bind(scope.id())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TitleRecord::try_from).transpose()
    }

    /// Fetches every meter attached directly to the unit.
    pub async fn fetch_unit_meters(&self, unit_id: Uuid) -> Result<Vec<Meter>, DbError> {
        let rows = sqlx::query_as::<_, DbMeter>(
            r#"
            SELECT id, scope, scope_id, "type" AS meter_type, provider_acct
            FROM meter
            WHERE scope = 'unit' AND scope_id = $1
            "#,
        )
        .bind(unit_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Meter::try_from).collect()
    }

    /// Fetches a meter's readings from the last `days_back` days, oldest first.
    pub async fn fetch_readings(&self, meter_id: Uuid, days_back: u32) -> Result<Vec<MeterReading>, DbError> {
        let ts_from = window_start(Utc::now(), days_back)?;
        let rows = sqlx::query_as::<_, DbMeterReading>(
            r#"
            SELECT meter_id, ts, value
            FROM meter_reading
            WHERE meter_id = $1 AND ts >= $2
            ORDER BY ts ASC
            "#,
        )
        .bind(meter_id)
        .bind(ts_from)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(%meter_id, days_back, count = rows.len(), "Fetched meter readings.");
        Ok(rows.into_iter().map(MeterReading::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{CoreError, LeaseStatus};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn unit_core_row() -> DbUnitCore {
        DbUnitCore {
            unit_id: Uuid::new_v4(),
            building_id: Uuid::new_v4(),
            parcel_id: Uuid::new_v4(),
            unit_use_type: "residential".to_string(),
            nla_m2: None,
            floor_no: None,
            bedrooms: None,
            orientation: None,
            year_built: Some(2008),
            structure: None,
            floors: Some(7),
            bua_m2: Some(dec!(5250.5)),
            muni_id: "JED-17".to_string(),
            zoning: "C1".to_string(),
            parcel_geom_wkt: None,
        }
    }

    #[test]
    fn unit_core_defaults_absent_values() {
        let row = unit_core_row();
        let (unit_id, building_id, parcel_id) = (row.unit_id, row.building_id, row.parcel_id);
        let (unit, building, parcel) = row.into_chain();

        assert_eq!(unit.id, unit_id);
        assert_eq!(unit.building_id, building_id);
        assert_eq!(unit.nla_m2, 0.0);
        assert_eq!(unit.floor_no, 0);
        assert_eq!(unit.bedrooms, None);
        assert_eq!(building.parcel_id, parcel_id);
        assert_eq!(building.bua_m2, 5250.5);
        assert_eq!(building.structure, "");
        assert_eq!(parcel.zoning, "C1");
        assert_eq!(parcel.geom_wkt, "");
    }

    #[test]
    fn lease_status_is_parsed() {
        let row = DbLease {
            id: Uuid::new_v4(),
            unit_id: Uuid::new_v4(),
            tenant_hash: "t-1".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            rent_monthly: Some(dec!(4500.00)),
            deposit: None,
            status: "active".to_string(),
        };
        let lease = Lease::try_from(row.clone()).unwrap();
        assert_eq!(lease.status, LeaseStatus::Active);
        assert_eq!(lease.rent_monthly, 4500.0);
        assert_eq!(lease.deposit, 0.0);

        let bad = DbLease {
            status: "terminated".to_string(),
            ..row
        };
        assert!(matches!(
            Lease::try_from(bad),
            Err(DbError::Mapping(CoreError::InvalidInput(_, _)))
        ));
    }

    #[test]
    fn permit_scope_becomes_tagged_variant() {
        let building_id = Uuid::new_v4();
        let row = DbPermit {
            id: Uuid::new_v4(),
            scope: "building".to_string(),
            scope_id: building_id,
            kind: "occupancy".to_string(),
            status: "completed".to_string(),
            issued_on: NaiveDate::from_ymd_opt(2019, 2, 1).unwrap(),
            completed_on: NaiveDate::from_ymd_opt(2020, 2, 1),
            permit_no: "OCC-9".to_string(),
        };
        let permit = Permit::try_from(row).unwrap();
        assert_eq!(permit.scope, Scope::Building(building_id));
        assert_eq!(permit.status, PermitStatus::Completed);
    }

    #[test]
    fn unfamiliar_permit_status_still_maps() {
        let building_id = Uuid::new_v4();
        let row = DbPermit {
            id: Uuid::new_v4(),
            scope: "building".to_string(),
            scope_id: building_id,
            kind: "occupancy".to_string(),
            status: "approved".to_string(),
            issued_on: NaiveDate::from_ymd_opt(2019, 2, 1).unwrap(),
            completed_on: None,
            permit_no: "OCC-10".to_string(),
        };
        let permit = Permit::try_from(row.clone()).unwrap();
        assert_eq!(permit.status, PermitStatus::Other("approved".to_string()));

        let capitalized = DbPermit {
            status: "Completed".to_string(),
            ..row
        };
        assert_eq!(Permit::try_from(capitalized).unwrap().status, PermitStatus::Completed);
    }

    #[test]
    fn meter_on_parcel_is_a_mapping_error() {
        let row = DbMeter {
            id: Uuid::new_v4(),
            scope: "parcel".to_string(),
            scope_id: Uuid::new_v4(),
            meter_type: "electricity".to_string(),
            provider_acct: None,
        };
        assert!(matches!(
            Meter::try_from(row),
            Err(DbError::Mapping(CoreError::InvalidScope(_, _)))
        ));
    }

    #[test]
    fn reading_window_rejects_overflow() {
        let now = Utc::now();
        assert_eq!(window_start(now, 7).unwrap(), now - Duration::days(7));
        assert!(matches!(
            window_start(now, u32::MAX),
            Err(DbError::WindowOutOfRange(u32::MAX))
        ));
    }

    #[test]
    fn encumbrance_accepts_object_or_encoded_string() {
        let from_object = encumbrance_from_json(Some(json!({"lien_status": "free", "liens": 0})));
        assert_eq!(from_object.get("lien_status").map(String::as_str), Some("free"));
        assert_eq!(from_object.get("liens").map(String::as_str), Some("0"));

        let from_string = encumbrance_from_json(Some(json!(r#"{"lien_status":"released"}"#)));
        assert_eq!(from_string.get("lien_status").map(String::as_str), Some("released"));
    }

    #[test]
    fn malformed_encumbrance_is_empty() {
        assert!(encumbrance_from_json(None).is_empty());
        assert!(encumbrance_from_json(Some(json!("not json"))).is_empty());
        assert!(encumbrance_from_json(Some(json!([1, 2, 3]))).is_empty());
    }

    #[test]
    fn title_row_maps_to_record() {
        let unit_id = Uuid::new_v4();
        let row = DbTitleRecord {
            id: Uuid::new_v4(),
            scope: "unit".to_string(),
            scope_id: unit_id,
            owner_hash: "o-1".to_string(),
            deed_no: "D-100".to_string(),
            encumbrance_json: Some(json!({"lien_status": "FREE"})),
            effective_on: NaiveDate::from_ymd_opt(2021, 9, 9).unwrap(),
        };
        let title = TitleRecord::try_from(row).unwrap();
        assert_eq!(title.scope, Scope::Unit(unit_id));
        assert!(title.is_clean());
    }
}
