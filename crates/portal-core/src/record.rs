//! Registry addressing for record types.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record type the upstream registry stores under a fixed entity-type name.
///
/// The name is what the registry's `add`, `update` and `search` operations
/// are keyed by (e.g. `"Facility"`).
pub trait RegistryRecord: Serialize + DeserializeOwned {
    /// Registry entity-type name.
    const ENTITY_TYPE: &'static str;
}
