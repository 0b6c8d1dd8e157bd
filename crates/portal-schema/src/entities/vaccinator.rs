use portal_core::RegistryRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constraint::EnumSet;
use crate::validate::{elements, FieldRule, Schema};

pub static VACCINATOR_STATUS: EnumSet = EnumSet::new(&["Active", "Inactive"]);

/// A person certified to administer vaccines at one or more facilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Vaccinator {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "portal_core::codec::finite::serialize"
    )]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programs: Option<Vec<Option<VaccinatorProgram>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_certificate: Option<String>,
}

impl Schema for Vaccinator {
    const ENTITY: &'static str = "Vaccinator";

    fn rules() -> &'static [FieldRule<Self>] {
        static RULES: [FieldRule<Vaccinator>; 2] = [
            FieldRule::sequence("programs", |v| elements(&v.programs)),
            FieldRule::one_of("status", &VACCINATOR_STATUS, |v| v.status.as_deref()),
        ];
        &RULES
    }
}

impl RegistryRecord for Vaccinator {
    const ENTITY_TYPE: &'static str = <Self as Schema>::ENTITY;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct VaccinatorProgram {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Schema for VaccinatorProgram {
    const ENTITY: &'static str = "VaccinatorProgram";

    fn rules() -> &'static [FieldRule<Self>] {
        static RULES: [FieldRule<VaccinatorProgram>; 1] =
            [FieldRule::one_of("status", &VACCINATOR_STATUS, |p| p.status.as_deref())];
        &RULES
    }
}
