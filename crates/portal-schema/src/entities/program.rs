use portal_core::RegistryRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constraint::EnumSet;
use crate::validate::{FieldRule, Schema};

pub static PROGRAM_STATUS: EnumSet = EnumSet::new(&["Active", "Inactive"]);

/// A vaccination program and the medicines it administers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Program {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "logoURL", skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medicine_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Schema for Program {
    const ENTITY: &'static str = "Program";

    fn rules() -> &'static [FieldRule<Self>] {
        static RULES: [FieldRule<Program>; 1] =
            [FieldRule::one_of("status", &PROGRAM_STATUS, |p| p.status.as_deref())];
        &RULES
    }
}

impl RegistryRecord for Program {
    const ENTITY_TYPE: &'static str = <Self as Schema>::ENTITY;
}
