//! # portal-schema — Record Validation Engine
//!
//! Declarative validation for portal records (facilities, vaccinators,
//! programs, medicines, enrollments).
//!
//! - [`constraint`]: field evaluators (zero-value exemption, case-insensitive
//!   enum membership).
//! - [`validate`]: the generic engine. Each record type declares a static
//!   rule table through [`Schema`]; [`Validate`] walks it, recursing into
//!   nested records and sequences.
//! - [`violation`]: path-scoped [`Violation`]s and the single
//!   [`CompositeValidationError`] a failed pass produces.
//! - [`entities`]: the record types and their tables.
//! - [`ingest`]: building records from uploaded rows.
//!
//! ## Crate Policy
//!
//! - Validation is pure. No I/O, no logging, no shared mutable state.
//! - Validation never stops early: every violation is reported, in table
//!   order, with its full dotted path.
//! - Supplied values are compared, never normalized.

pub mod constraint;
pub mod entities;
pub mod ingest;
pub mod validate;
pub mod violation;

pub use constraint::{Absent, EnumSet};
pub use entities::{
    Address, Enrollment, Facility, FacilityAdmin, FacilityProgram, FacilityUpdate, Medicine,
    Program, Schedule, Vaccinator, VaccinatorProgram,
};
pub use ingest::{FromRow, Row, RowError};
pub use validate::{FieldRule, Schema, Validate};
pub use violation::{
    CompositeValidationError, FieldPath, PathSegment, ReasonKind, ValidationViolations, Violation,
};
