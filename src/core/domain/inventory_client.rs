//! Read-only view of the inventory needed to build a storage report.

use crate::core::domain::{
    error::VsphereResult,
    model::{
        inventory::{ClusterRef, DatacenterRef, DatastoreDetails, StoragePod},
        managed_object::ManagedObjectReference,
    },
};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// One way of locating a datacenter's datastore folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderLookup {
    /// A child of the datacenter with the given name.
    Relative(&'static str),
    /// The constructed inventory path `<datacenter path>/datastore`.
    InventoryPath,
}

/// Lookups tried in order when discovering datastore folders; the first
/// one that succeeds with a non-empty result wins.
pub const DATASTORE_FOLDER_LOOKUPS: [FolderLookup; 3] = [
    FolderLookup::Relative("datastores"),
    FolderLookup::Relative("datastore"),
    FolderLookup::InventoryPath,
];

/// Narrow read interface over the inventory API.
///
/// Every call may fail with a connectivity or permission error; callers
/// decide whether that aborts the run or only degrades one cluster.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// All datacenters below the inventory root, in traversal order.
    async fn list_datacenters(&self) -> VsphereResult<Vec<DatacenterRef>>;

    /// Compute clusters of a datacenter.
    async fn list_clusters(&self, datacenter: &DatacenterRef) -> VsphereResult<Vec<ClusterRef>>;

    /// Datastore folders found by a single lookup strategy.
    async fn find_datastore_folders(
        &self,
        datacenter: &DatacenterRef,
        lookup: FolderLookup,
    ) -> VsphereResult<Vec<ManagedObjectReference>>;

    /// Datastore clusters directly inside a folder, with their members.
    async fn list_storage_pods(
        &self,
        folder: &ManagedObjectReference,
    ) -> VsphereResult<Vec<StoragePod>>;

    /// Datastores reachable by a compute cluster.
    async fn get_cluster_datastores(
        &self,
        cluster: &ClusterRef,
    ) -> VsphereResult<Vec<ManagedObjectReference>>;

    /// Name and capacity of each datastore, in the order requested.
    async fn get_datastore_details(
        &self,
        datastores: &[ManagedObjectReference],
    ) -> VsphereResult<Vec<DatastoreDetails>>;
}
