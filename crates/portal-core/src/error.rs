//! # Error Types — Codec Failures
//!
//! Errors raised while turning a record into interchange bytes or back.
//! These never describe a field constraint failure: those are violations and
//! live in `portal-schema`.

use thiserror::Error;

/// Error produced by the interchange codec.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input bytes could not be parsed into the record shape.
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The record could not be written to interchange bytes.
    ///
    /// Raised for values the format cannot represent, such as non-finite floats.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The record does not serialize to a key/value object and therefore
    /// cannot be flattened into an attribute mapping.
    #[error("record serializes to a JSON {0}, expected an object")]
    NotAnObject(&'static str),
}

impl CodecError {
    /// Whether this error came from reading input bytes.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
