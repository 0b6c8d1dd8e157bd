//! # Interchange Codec — Record ⇄ Bytes ⇄ Attribute Mapping
//!
//! Records cross the API boundary as compact JSON with camelCase field
//! names. The same encoding is used when a validated record is re-shaped into
//! the string-keyed attribute mapping that the registry accepts.
//!
//! ## Round-Trip Law
//!
//! For every representable record `r`, `decode(&encode(&r)?)? == r`:
//!
//! - Absent optional fields are omitted on encode and come back absent.
//! - Empty sequences are written as `[]` and come back empty, not absent.
//! - Floats are written with shortest round-trip precision. Non-finite
//!   floats have no JSON representation and are rejected on encode (record
//!   fields opt in through [`finite`]).
//!
//! ## Error Channel
//!
//! Malformed input yields [`CodecError::Decode`]. Callers surface it before
//! validation runs; it is never folded into a violation set.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::CodecError;

/// String-keyed attribute mapping submitted to the registry.
pub type AttributeMap = serde_json::Map<String, Value>;

/// Encode a record into interchange bytes.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if the record holds a value the format
/// cannot represent.
pub fn encode<T: Serialize>(record: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(record).map_err(CodecError::Encode)
}

/// Decode interchange bytes into a record.
///
/// Unknown fields are ignored so that newer clients can talk to this
/// service without a lockstep upgrade.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] if the bytes are not valid JSON or do not
/// match the record shape.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(CodecError::Decode)
}

/// Flatten a record into a registry attribute mapping.
///
/// Produces exactly the key/value pairs [`encode`] would write, so absent
/// fields are absent from the mapping as well.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] for unrepresentable values and
/// [`CodecError::NotAnObject`] if the record is not a key/value structure.
pub fn to_attributes<T: Serialize>(record: &T) -> Result<AttributeMap, CodecError> {
    match serde_json::to_value(record).map_err(CodecError::Encode)? {
        Value::Object(map) => Ok(map),
        other => Err(CodecError::NotAnObject(json_type_name(&other))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Serializer for optional float fields that refuses non-finite values.
///
/// `serde_json` silently writes `NaN` and infinities as `null`, which would
/// decode back as an absent field and break the round-trip law. Use with
/// `#[serde(serialize_with = "portal_core::codec::finite::serialize")]`.
pub mod finite {
    use serde::ser::Error as _;
    use serde::Serializer;

    /// Serialize an `Option<f64>`, failing on `NaN` or `±inf`.
    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) if !v.is_finite() => Err(S::Error::custom(format!(
                "non-finite number {v} has no interchange representation"
            ))),
            Some(v) => serializer.serialize_some(v),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            serialize_with = "finite::serialize"
        )]
        score: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tags: Option<Vec<String>>,
    }

    #[test]
    fn absent_fields_are_omitted() {
        let sample = Sample {
            display_name: None,
            score: None,
            tags: None,
        };
        assert_eq!(encode(&sample).unwrap(), b"{}");
    }

    #[test]
    fn empty_sequence_survives_as_empty() {
        let sample = Sample {
            display_name: None,
            score: None,
            tags: Some(vec![]),
        };
        let bytes = encode(&sample).unwrap();
        assert_eq!(bytes, br#"{"tags":[]}"#);
        let back: Sample = decode(&bytes).unwrap();
        assert_eq!(back.tags, Some(vec![]));
    }

    #[test]
    fn wire_names_are_camel_case() {
        let sample = Sample {
            display_name: Some("Clinic".into()),
            score: Some(4.5),
            tags: None,
        };
        let text = String::from_utf8(encode(&sample).unwrap()).unwrap();
        assert!(text.contains("\"displayName\":\"Clinic\""), "got: {text}");
    }

    #[test]
    fn malformed_bytes_are_a_decode_error() {
        let err = decode::<Sample>(b"{\"displayName\": ").unwrap_err();
        assert!(err.is_decode());
        assert!(err.to_string().starts_with("decode error"));
    }

    #[test]
    fn wrong_field_type_is_a_decode_error() {
        let err = decode::<Sample>(br#"{"score": "high"}"#).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let sample: Sample = decode(br#"{"displayName":"A","legacyField":1}"#).unwrap();
        assert_eq!(sample.display_name.as_deref(), Some("A"));
    }

    #[test]
    fn non_finite_float_is_an_encode_error() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let sample = Sample {
                display_name: None,
                score: Some(bad),
                tags: None,
            };
            let err = encode(&sample).unwrap_err();
            assert!(matches!(err, CodecError::Encode(_)), "value {bad}");
            assert!(to_attributes(&sample).is_err());
        }
    }

    #[test]
    fn attributes_match_encoded_keys() {
        let sample = Sample {
            display_name: Some("Clinic".into()),
            score: None,
            tags: Some(vec!["a".into()]),
        };
        let attrs = to_attributes(&sample).unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs["displayName"], "Clinic");
        assert_eq!(attrs["tags"], serde_json::json!(["a"]));
        assert!(!attrs.contains_key("score"));
    }

    #[test]
    fn attributes_require_an_object() {
        let err = to_attributes(&vec![1, 2, 3]).unwrap_err();
        match err {
            CodecError::NotAnObject(kind) => assert_eq!(kind, "array"),
            other => panic!("expected NotAnObject, got: {other}"),
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Reading {
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            serialize_with = "finite::serialize"
        )]
        value: Option<f64>,
    }

    proptest! {
        /// Any finite float survives the codec unchanged.
        #[test]
        fn finite_floats_round_trip(v in proptest::num::f64::NORMAL | proptest::num::f64::SUBNORMAL | proptest::num::f64::ZERO) {
            let reading = Reading { value: Some(v) };
            let back: Reading = decode(&encode(&reading).unwrap()).unwrap();
            prop_assert_eq!(back.value, Some(v));
        }

        /// Arbitrary bytes either decode or fail on the decode channel; they never panic.
        #[test]
        fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            if let Err(e) = decode::<Reading>(&bytes) {
                prop_assert!(e.is_decode());
            }
        }
    }
}
