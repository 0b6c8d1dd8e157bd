use portal_core::RegistryRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Address;
use crate::constraint::EnumSet;
use crate::validate::{nested, FieldRule, Schema};

pub static GENDER: EnumSet = EnumSet::new(&["Male", "Female", "Other"]);

/// A pre-enrolled recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_scope_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Schema for Enrollment {
    const ENTITY: &'static str = "Enrollment";

    fn rules() -> &'static [FieldRule<Self>] {
        static RULES: [FieldRule<Enrollment>; 2] = [
            FieldRule::nested("address", |e| nested(&e.address)),
            FieldRule::one_of("gender", &GENDER, |e| e.gender.as_deref()),
        ];
        &RULES
    }
}

impl RegistryRecord for Enrollment {
    const ENTITY_TYPE: &'static str = <Self as Schema>::ENTITY;
}
