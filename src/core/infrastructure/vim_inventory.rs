//! `InventoryClient` over the VI/JSON property and method endpoints.

use crate::{
    VsphereClient, VsphereResult,
    core::domain::{
        inventory_client::{FolderLookup, InventoryClient},
        model::{
            inventory::{ClusterRef, DatacenterRef, DatastoreDetails, DatastoreSummary, StoragePod},
            managed_object::ManagedObjectReference,
        },
    },
};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

const FOLDER: &str = "Folder";
const DATACENTER: &str = "Datacenter";
const CLUSTER: &str = "ClusterComputeResource";
const STORAGE_POD: &str = "StoragePod";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FindChildRequest<'a> {
    entity: &'a ManagedObjectReference,
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FindByInventoryPathRequest<'a> {
    inventory_path: &'a str,
}

impl VsphereClient {
    async fn name_of(&self, object: &ManagedObjectReference) -> VsphereResult<String> {
        self.api_client.get_property(object, "name").await
    }

    async fn children_of(
        &self,
        folder: &ManagedObjectReference,
    ) -> VsphereResult<Vec<ManagedObjectReference>> {
        self.api_client.get_property(folder, "childEntity").await
    }

    async fn storage_pod(&self, pod: ManagedObjectReference) -> VsphereResult<StoragePod> {
        let name = self.name_of(&pod).await?;
        let members = self.children_of(&pod).await?;
        Ok(StoragePod {
            name,
            reference: pod,
            members,
        })
    }
}

#[async_trait]
impl InventoryClient for VsphereClient {
    async fn list_datacenters(&self) -> VsphereResult<Vec<DatacenterRef>> {
        let root = self.api_client.service_content().await?.root_folder;
        let mut datacenters = Vec::new();
        // Folders breadth-first, paired with their inventory path.
        let mut pending = VecDeque::from([(root, String::new())]);

        while let Some((folder, prefix)) = pending.pop_front() {
            for child in self.children_of(&folder).await? {
                if !child.is(DATACENTER) && !child.is(FOLDER) {
                    continue;
                }
                let name = self.name_of(&child).await?;
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{}/{}", prefix, name)
                };
                if child.is(DATACENTER) {
                    datacenters.push(DatacenterRef {
                        name,
                        reference: child,
                        inventory_path: path,
                    });
                } else {
                    pending.push_back((child, path));
                }
            }
        }

        Ok(datacenters)
    }

    async fn list_clusters(&self, datacenter: &DatacenterRef) -> VsphereResult<Vec<ClusterRef>> {
        let host_folder: ManagedObjectReference = self
            .api_client
            .get_property(&datacenter.reference, "hostFolder")
            .await?;
        let mut clusters = Vec::new();
        let mut pending = VecDeque::from([host_folder]);

        while let Some(folder) = pending.pop_front() {
            for child in self.children_of(&folder).await? {
                if child.is(CLUSTER) {
                    let name = self.name_of(&child).await?;
                    clusters.push(ClusterRef {
                        name,
                        reference: child,
                    });
                } else if child.is(FOLDER) {
                    pending.push_back(child);
                }
            }
        }

        Ok(clusters)
    }

    async fn find_datastore_folders(
        &self,
        datacenter: &DatacenterRef,
        lookup: FolderLookup,
    ) -> VsphereResult<Vec<ManagedObjectReference>> {
        let search_index = self.api_client.service_content().await?.search_index;
        let found: Option<ManagedObjectReference> = match lookup {
            FolderLookup::Relative(name) => {
                let request = FindChildRequest {
                    entity: &datacenter.reference,
                    name,
                };
                self.api_client
                    .invoke(&search_index, "FindChild", &request)
                    .await?
            }
            FolderLookup::InventoryPath => {
                let path = format!("{}/datastore", datacenter.inventory_path);
                let request = FindByInventoryPathRequest {
                    inventory_path: &path,
                };
                self.api_client
                    .invoke(&search_index, "FindByInventoryPath", &request)
                    .await?
            }
        };

        Ok(found.into_iter().filter(|mo| mo.is(FOLDER)).collect())
    }

    async fn list_storage_pods(
        &self,
        folder: &ManagedObjectReference,
    ) -> VsphereResult<Vec<StoragePod>> {
        let mut pods = Vec::new();
        for child in self.children_of(folder).await? {
            if !child.is(STORAGE_POD) {
                continue;
            }
            let reference = child.to_string();
            match self.storage_pod(child).await {
                Ok(pod) => pods.push(pod),
                Err(e) => debug!(pod = %reference, error = %e, "skipping unreadable storage pod"),
            }
        }
        Ok(pods)
    }

    async fn get_cluster_datastores(
        &self,
        cluster: &ClusterRef,
    ) -> VsphereResult<Vec<ManagedObjectReference>> {
        self.api_client
            .get_property(&cluster.reference, "datastore")
            .await
    }

    async fn get_datastore_details(
        &self,
        datastores: &[ManagedObjectReference],
    ) -> VsphereResult<Vec<DatastoreDetails>> {
        let mut details = Vec::with_capacity(datastores.len());
        for datastore in datastores {
            let summary: DatastoreSummary =
                self.api_client.get_property(datastore, "summary").await?;
            if !summary.is_accessible() {
                debug!(
                    datastore = %datastore,
                    capacity = summary.capacity,
                    free_space = summary.free_space,
                    "datastore is not accessible"
                );
            }
            details.push(summary.into_details(datastore.clone()));
        }
        Ok(details)
    }
}
