use portal_core::RegistryRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constraint::EnumSet;
use crate::validate::{nested, FieldRule, Schema};

pub static VACCINATION_MODE: EnumSet = EnumSet::new(&["muscular injection", "oral", "nasal"]);
pub static MEDICINE_STATUS: EnumSet = EnumSet::new(&["Active", "Inactive", "Blocked"]);

/// A vaccine or other medicine offered under a program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Medicine {
    /// Validity in days from administration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_until: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "portal_core::codec::finite::serialize"
    )]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Schedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vaccination_mode: Option<String>,
}

impl Schema for Medicine {
    const ENTITY: &'static str = "Medicine";

    fn rules() -> &'static [FieldRule<Self>] {
        static RULES: [FieldRule<Medicine>; 3] = [
            FieldRule::nested("schedule", |m| nested(&m.schedule)),
            FieldRule::one_of("status", &MEDICINE_STATUS, |m| m.status.as_deref()),
            FieldRule::one_of("vaccinationMode", &VACCINATION_MODE, |m| {
                m.vaccination_mode.as_deref()
            }),
        ];
        &RULES
    }
}

impl RegistryRecord for Medicine {
    const ENTITY_TYPE: &'static str = <Self as Schema>::ENTITY;
}

/// Dose schedule: `repeatTimes` doses, `repeatInterval` days apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Schedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_times: Option<i64>,
}

impl Schema for Schedule {
    const ENTITY: &'static str = "Schedule";

    fn rules() -> &'static [FieldRule<Self>] {
        &[]
    }
}
