//! # Row Ingestion
//!
//! Bulk uploads arrive as tabular rows keyed by column header. [`FromRow`]
//! assembles a record from one [`Row`]. Blank cells read as absent.
//!
//! Cells that cannot be parsed into the field's type (`averageRating=abc`,
//! `certified=maybe`) fail with [`RowError`]. That is a conversion failure,
//! not a violation: the row is rejected before validation runs.
//!
//! ## Columns
//!
//! | Record | Columns |
//! |---|---|
//! | Facility | `facilityCode`, `facilityName`, `contact`, `email`, `websiteUrl`, `geoLocation`, `operatingHourStart`, `operatingHourEnd`, `category`, `type`, `status`, `averageRating`, address columns, `adminName`, `adminMobile`, `adminEmail`, `adminStatus`, `programId`, `programName`, `programStatus`, `programRate` |
//! | Vaccinator | `code`, `nationalIdentifier`, `name`, `mobileNumber`, `facilityIds` (comma-separated), `averageRating`, `trainingCertificate`, `signatureString`, `status`, `programId`, `programStatus`, `certified` |
//! | Enrollment | `phone`, `enrollmentScopeId`, `nationalId`, `dob`, `gender`, `name`, `email`, `code`, `certified`, address columns |
//!
//! Address columns are `addressLine1`, `addressLine2`, `district`, `state`,
//! `pincode`.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::entities::{
    Address, Enrollment, Facility, FacilityAdmin, FacilityProgram, Vaccinator, VaccinatorProgram,
};

/// Errors from converting a row into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("row {row}: column {column}: {value:?} is not a finite number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: column {column}: {value:?} is not true or false")]
    InvalidFlag {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// One uploaded row: column header to raw cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    number: usize,
    cells: BTreeMap<String, String>,
}

impl Row {
    /// A row with its 1-based data-row number.
    pub fn new<K, V>(number: usize, cells: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            number,
            cells: cells
                .into_iter()
                .map(|(k, v)| (k.into().trim().to_string(), v.into()))
                .collect(),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    /// Trimmed cell text, or `None` for a missing or blank cell.
    pub fn text(&self, column: &str) -> Option<String> {
        self.cells
            .get(column)
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .map(str::to_string)
    }

    pub fn float(&self, column: &'static str) -> Result<Option<f64>, RowError> {
        let Some(raw) = self.text(column) else {
            return Ok(None);
        };
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(RowError::InvalidNumber {
                row: self.number,
                column,
                value: raw,
            }),
        }
    }

    /// Accepts `true`/`false`, `yes`/`no`, and `1`/`0`, in any case.
    pub fn flag(&self, column: &'static str) -> Result<Option<bool>, RowError> {
        let Some(raw) = self.text(column) else {
            return Ok(None);
        };
        match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            _ => Err(RowError::InvalidFlag {
                row: self.number,
                column,
                value: raw,
            }),
        }
    }

    /// Comma-separated cell as a list of non-blank items.
    pub fn list(&self, column: &str) -> Option<Vec<String>> {
        let raw = self.text(column)?;
        Some(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    fn any(&self, columns: &[&str]) -> bool {
        columns.iter().any(|c| self.text(c).is_some())
    }
}

/// Build a record from one uploaded row.
pub trait FromRow: Sized {
    /// # Errors
    ///
    /// Returns [`RowError`] when a typed cell does not parse.
    fn from_row(row: &Row) -> Result<Self, RowError>;
}

const ADDRESS_COLUMNS: [&str; 5] = ["addressLine1", "addressLine2", "district", "state", "pincode"];

fn address(row: &Row) -> Option<Address> {
    row.any(&ADDRESS_COLUMNS).then(|| Address {
        address_line1: row.text("addressLine1"),
        address_line2: row.text("addressLine2"),
        district: row.text("district"),
        state: row.text("state"),
        pincode: row.text("pincode"),
    })
}

impl FromRow for Facility {
    fn from_row(row: &Row) -> Result<Self, RowError> {
        let admin = row
            .any(&["adminName", "adminMobile", "adminEmail", "adminStatus"])
            .then(|| FacilityAdmin {
                name: row.text("adminName"),
                mobile: row.text("adminMobile"),
                email: row.text("adminEmail"),
                status: row.text("adminStatus"),
            });

        let program = if row.any(&["programId", "programName", "programStatus", "programRate"]) {
            Some(FacilityProgram {
                program_id: row.text("programId"),
                name: row.text("programName"),
                status: row.text("programStatus"),
                rate: row.float("programRate")?,
                ..Default::default()
            })
        } else {
            None
        };

        Ok(Facility {
            address: address(row),
            admins: admin.map(|a| vec![Some(a)]),
            average_rating: row.float("averageRating")?,
            category: row.text("category"),
            contact: row.text("contact"),
            email: row.text("email"),
            facility_code: row.text("facilityCode"),
            facility_name: row.text("facilityName"),
            geo_location: row.text("geoLocation"),
            operating_hour_end: row.text("operatingHourEnd"),
            operating_hour_start: row.text("operatingHourStart"),
            programs: program.map(|p| vec![Some(p)]),
            stamp: None,
            status: row.text("status"),
            kind: row.text("type"),
            website_url: row.text("websiteUrl"),
        })
    }
}

impl FromRow for Vaccinator {
    fn from_row(row: &Row) -> Result<Self, RowError> {
        let program = if row.any(&["programId", "programStatus", "certified"]) {
            Some(VaccinatorProgram {
                program_id: row.text("programId"),
                status: row.text("programStatus"),
                certified: row.flag("certified")?,
            })
        } else {
            None
        };

        Ok(Vaccinator {
            average_rating: row.float("averageRating")?,
            code: row.text("code"),
            facility_ids: row.list("facilityIds"),
            mobile_number: row.text("mobileNumber"),
            name: row.text("name"),
            national_identifier: row.text("nationalIdentifier"),
            programs: program.map(|p| vec![Some(p)]),
            signature_string: row.text("signatureString"),
            status: row.text("status"),
            training_certificate: row.text("trainingCertificate"),
        })
    }
}

impl FromRow for Enrollment {
    fn from_row(row: &Row) -> Result<Self, RowError> {
        Ok(Enrollment {
            address: address(row),
            certified: row.flag("certified")?,
            code: row.text("code"),
            dob: row.text("dob"),
            email: row.text("email"),
            enrollment_scope_id: row.text("enrollmentScopeId"),
            gender: row.text("gender"),
            name: row.text("name"),
            national_id: row.text("nationalId"),
            phone: row.text("phone"),
        })
    }
}
