//! Managed object references as carried by the VI/JSON API.
//!
//! Every inventory object is addressed by a `{type, value}` pair such as
//! `{"type": "Datastore", "value": "datastore-17"}`. The `value` is stable
//! for the lifetime of the object and unique per vCenter, unlike names.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Reference to a managed object in the vCenter inventory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ManagedObjectReference {
    /// Managed object type (e.g. `Folder`, `StoragePod`, `Datastore`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Per-object identifier (e.g. `group-p42`).
    pub value: String,
}

impl ManagedObjectReference {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if the reference points at an object of `kind`.
    #[must_use]
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl std::fmt::Display for ManagedObjectReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

// The wire form must carry the `_typeName` discriminator when sent as an
// argument, so serialization is written out by hand.
impl Serialize for ManagedObjectReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ManagedObjectReference", 3)?;
        state.serialize_field("_typeName", "ManagedObjectReference")?;
        state.serialize_field("type", &self.kind)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

/// The subset of `ServiceInstance.content` needed for inventory traversal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceContent {
    /// Root of the inventory tree.
    pub root_folder: ManagedObjectReference,
    /// Session manager used for login/logout.
    pub session_manager: ManagedObjectReference,
    /// Search index used for inventory path lookups.
    pub search_index: ManagedObjectReference,
}
