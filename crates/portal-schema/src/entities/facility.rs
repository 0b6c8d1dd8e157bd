//! Facility records: the facility itself, its admins, and its program
//! associations.

use portal_core::RegistryRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Address;
use crate::constraint::EnumSet;
use crate::validate::{elements, nested, FieldRule, Schema};

pub static FACILITY_CATEGORY: EnumSet = EnumSet::new(&["GOVT", "PRIVATE"]);
pub static FACILITY_STATUS: EnumSet = EnumSet::new(&["Active", "Inactive", "Blocked"]);
pub static FACILITY_TYPE: EnumSet = EnumSet::new(&["Fixed location", "Mobile", "Both"]);
pub static ADMIN_STATUS: EnumSet = EnumSet::new(&["Active", "Inactive"]);

/// A vaccination facility.
///
/// `averageRating` is documented as 0 to 5 but is not range-checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Facility {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admins: Option<Vec<Option<FacilityAdmin>>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "portal_core::codec::finite::serialize"
    )]
    pub average_rating: Option<f64>,
    /// One of `GOVT`, `PRIVATE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_hour_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_hour_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programs: Option<Vec<Option<FacilityProgram>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamp: Option<String>,
    /// One of `Active`, `Inactive`, `Blocked`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// One of `Fixed location`, `Mobile`, `Both`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

impl Schema for Facility {
    const ENTITY: &'static str = "Facility";

    fn rules() -> &'static [FieldRule<Self>] {
        static RULES: [FieldRule<Facility>; 6] = [
            FieldRule::nested("address", |f| nested(&f.address)),
            FieldRule::sequence("admins", |f| elements(&f.admins)),
            FieldRule::one_of("category", &FACILITY_CATEGORY, |f| f.category.as_deref()),
            FieldRule::sequence("programs", |f| elements(&f.programs)),
            FieldRule::one_of("status", &FACILITY_STATUS, |f| f.status.as_deref()),
            FieldRule::one_of("type", &FACILITY_TYPE, |f| f.kind.as_deref()),
        ];
        &RULES
    }
}

impl RegistryRecord for Facility {
    const ENTITY_TYPE: &'static str = <Self as Schema>::ENTITY;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct FacilityAdmin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Schema for FacilityAdmin {
    const ENTITY: &'static str = "FacilityAdmin";

    fn rules() -> &'static [FieldRule<Self>] {
        static RULES: [FieldRule<FacilityAdmin>; 1] =
            [FieldRule::one_of("status", &ADMIN_STATUS, |a| a.status.as_deref())];
        &RULES
    }
}

/// A facility's association with a vaccination program. Carries no
/// constraints of its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct FacilityProgram {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "portal_core::codec::finite::serialize"
    )]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_updated_at: Option<String>,
}

impl Schema for FacilityProgram {
    const ENTITY: &'static str = "FacilityProgram";

    fn rules() -> &'static [FieldRule<Self>] {
        &[]
    }
}

/// An update to an existing facility, addressed by registry `osid`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FacilityUpdate {
    pub osid: String,
    #[serde(flatten)]
    pub facility: Facility,
}
