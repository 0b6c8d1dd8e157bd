//! Registry record types and their constraint tables.
//!
//! Every record is a plain serde struct with all-optional fields. Wire names
//! are camelCase; absent fields are omitted on encode.

pub mod enrollment;
pub mod facility;
pub mod medicine;
pub mod program;
pub mod vaccinator;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::validate::{FieldRule, Schema};

pub use enrollment::Enrollment;
pub use facility::{Facility, FacilityAdmin, FacilityProgram, FacilityUpdate};
pub use medicine::{Medicine, Schedule};
pub use program::Program;
pub use vaccinator::{Vaccinator, VaccinatorProgram};

/// Postal address shared by facilities and enrollments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

impl Schema for Address {
    const ENTITY: &'static str = "Address";

    fn rules() -> &'static [FieldRule<Self>] {
        &[]
    }
}
