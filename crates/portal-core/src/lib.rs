//! # portal-core — Foundational Types for the Registry Portal
//!
//! The leaf crate of the workspace. It owns the interchange format every
//! record travels in and the error types that describe a failure to produce
//! or read it.
//!
//! ## Key Design Principles
//!
//! 1. **One codec.** Wire (de)serialization and the re-shaping of a record
//!    into a registry attribute mapping both go through [`codec`]. No ad-hoc
//!    `serde_json::to_vec()` calls in handlers.
//!
//! 2. **Decode failures are not violations.** A [`CodecError`] is raised
//!    before validation ever runs and is a separate error channel from the
//!    composite validation error in `portal-schema`.
//!
//! 3. **Registry addressing is static.** Every forwardable record type names
//!    its registry entity type through [`RegistryRecord::ENTITY_TYPE`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `portal-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod codec;
pub mod error;
pub mod record;

pub use codec::{decode, encode, to_attributes, AttributeMap};
pub use error::CodecError;
pub use record::RegistryRecord;
