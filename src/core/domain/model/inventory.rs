//! Domain models for the inventory objects the report walks.

use super::managed_object::ManagedObjectReference;
use serde::Deserialize;

/// A datacenter found under the inventory root.
#[derive(Debug, Clone, PartialEq)]
pub struct DatacenterRef {
    pub name: String,
    pub reference: ManagedObjectReference,
    /// Folder names from the root down to the datacenter, `/`-joined,
    /// without a leading slash (e.g. `EMEA/DC01`).
    pub inventory_path: String,
}

/// A compute cluster within a datacenter.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterRef {
    pub name: String,
    pub reference: ManagedObjectReference,
}

/// A datastore cluster and the references of its children.
///
/// Members are kept in the order the API returned them and may point at
/// objects other than datastores.
#[derive(Debug, Clone, PartialEq)]
pub struct StoragePod {
    pub name: String,
    pub reference: ManagedObjectReference,
    pub members: Vec<ManagedObjectReference>,
}

/// Name and capacity of one datastore, in bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct DatastoreDetails {
    pub reference: ManagedObjectReference,
    pub name: String,
    pub capacity: u64,
    pub free_space: u64,
}

/// `Datastore.summary` as returned by `GET Datastore/{id}/summary`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatastoreSummary {
    pub name: String,
    /// Maximum capacity in bytes.
    pub capacity: i64,
    /// Available space in bytes.
    pub free_space: i64,
    #[serde(default)]
    pub accessible: Option<bool>,
}

impl DatastoreSummary {
    /// Datastores that do not report the flag are taken as accessible.
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        self.accessible.unwrap_or(true)
    }

    /// Pairs the summary with the reference it was read from. Negative
    /// sizes (reported by inaccessible datastores) are clamped to zero.
    pub fn into_details(self, reference: ManagedObjectReference) -> DatastoreDetails {
        DatastoreDetails {
            reference,
            name: self.name,
            capacity: u64::try_from(self.capacity).unwrap_or(0),
            free_space: u64::try_from(self.free_space).unwrap_or(0),
        }
    }
}
