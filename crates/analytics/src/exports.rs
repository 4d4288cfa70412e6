//! Standard exports for downstream systems.

use crate::compliance::title_clean_flag_from_record;
use chrono::NaiveDate;
use core_types::{Building, Parcel, Permit, TitleRecord, Unit};
use serde::Serialize;
use uuid::Uuid;

/// Minimal underwriting package for a loan origination system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LosPackage {
    pub parcel: LosParcel,
    pub building: LosBuilding,
    pub unit: LosUnit,
    pub title: LosTitle,
    pub permit_occupancy: LosPermitOccupancy,
    pub valuation: LosValuation,
    pub generated_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LosParcel {
    pub id: Uuid,
    pub muni_id: String,
    pub zoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LosBuilding {
    pub id: Uuid,
    pub year_built: i32,
    pub floors: i32,
    pub bua_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LosUnit {
    pub id: Uuid,
    pub use_type: String,
    pub nla_m2: f64,
    pub floor_no: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LosTitle {
    pub present: bool,
    pub deed_no: Option<String>,
    pub clean: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LosPermitOccupancy {
    /// Only an `occupancy` permit counts; a `completion` permit is not enough.
    pub present: bool,
    pub completed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LosValuation {
    pub avm_value: Option<f64>,
    pub valuation_date: Option<NaiveDate>,
}

impl LosPackage {
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        unit: &Unit,
        building: &Building,
        parcel: &Parcel,
        latest_title: Option<&TitleRecord>,
        latest_permit: Option<&Permit>,
        avm_value: Option<f64>,
        valuation_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        Self {
            parcel: LosParcel {
                id: parcel.id,
                muni_id: parcel.muni_id.clone(),
                zoning: parcel.zoning.clone(),
            },
            building: LosBuilding {
                id: building.id,
                year_built: building.year_built,
                floors: building.floors,
                bua_m2: building.bua_m2,
            },
            unit: LosUnit {
                id: unit.id,
                use_type: unit.use_type.clone(),
                nla_m2: unit.nla_m2,
                floor_no: unit.floor_no,
            },
            title: LosTitle {
                present: latest_title.is_some(),
                deed_no: latest_title.map(|t| t.deed_no.clone()),
                clean: title_clean_flag_from_record(latest_title),
            },
            permit_occupancy: LosPermitOccupancy {
                present: latest_permit.is_some_and(|p| p.kind == "occupancy"),
                completed_on: latest_permit.and_then(|p| p.completed_on),
            },
            valuation: LosValuation {
                avm_value,
                valuation_date,
            },
            generated_on: today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{PermitStatus, Scope};
    use std::collections::BTreeMap;

    fn chain() -> (Unit, Building, Parcel) {
        let parcel = Parcel {
            id: Uuid::new_v4(),
            muni_id: "RUH-0042".to_string(),
            zoning: "R2".to_string(),
            geom_wkt: "POLYGON((0 0,1 0,1 1,0 1,0 0))".to_string(),
        };
        let building = Building {
            id: Uuid::new_v4(),
            parcel_id: parcel.id,
            year_built: 2012,
            structure: "concrete".to_string(),
            floors: 6,
            bua_m2: 4_800.0,
        };
        let unit = Unit {
            id: Uuid::new_v4(),
            building_id: building.id,
            use_type: "residential".to_string(),
            nla_m2: 120.0,
            floor_no: 3,
            bedrooms: Some(3),
            orientation: None,
        };
        (unit, building, parcel)
    }

    #[test]
    fn test_package_without_title_or_permit() {
        let (u, b, p) = chain();
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let pkg = LosPackage::build(&u, &b, &p, None, None, None, None, today);
        assert!(!pkg.title.present);
        assert_eq!(pkg.title.deed_no, None);
        assert!(!pkg.title.clean);
        assert!(!pkg.permit_occupancy.present);
        assert_eq!(pkg.permit_occupancy.completed_on, None);
        assert_eq!(pkg.parcel.muni_id, "RUH-0042");

        let json = serde_json::to_value(&pkg).unwrap();
        assert_eq!(json["generated_on"], "2024-03-15");
        assert!(json["valuation"]["avm_value"].is_null());
    }

    #[test]
    fn test_completion_permit_is_not_occupancy() {
        let (u, b, p) = chain();
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let completed = NaiveDate::from_ymd_opt(2013, 5, 2);
        let permit = Permit {
            id: Uuid::new_v4(),
            scope: Scope::Building(b.id),
            kind: "completion".to_string(),
            status: PermitStatus::Completed,
            issued_on: NaiveDate::from_ymd_opt(2011, 1, 10).unwrap(),
            completed_on: completed,
            permit_no: "C-1".to_string(),
        };
        let mut encumbrance = BTreeMap::new();
        encumbrance.insert("lien_status".to_string(), "released".to_string());
        let title = TitleRecord::new(
            Uuid::new_v4(),
            Scope::Unit(u.id),
            "owner".to_string(),
            "DEED-7".to_string(),
            encumbrance,
            NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
        )
        .unwrap();

        let pkg = LosPackage::build(
            &u,
            &b,
            &p,
            Some(&title),
            Some(&permit),
            Some(950_000.0),
            Some(today),
            today,
        );
        assert!(!pkg.permit_occupancy.present);
        assert_eq!(pkg.permit_occupancy.completed_on, completed);
        assert_eq!(pkg.title.deed_no.as_deref(), Some("DEED-7"));
        assert!(pkg.title.clean);
        assert_eq!(pkg.valuation.avm_value, Some(950_000.0));
    }
}
