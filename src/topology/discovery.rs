//! Datacenter selection and storage pod discovery.

use crate::core::domain::{
    error::{VsphereError, VsphereResult},
    inventory_client::{DATASTORE_FOLDER_LOOKUPS, InventoryClient},
    model::{
        inventory::{DatacenterRef, StoragePod},
        managed_object::ManagedObjectReference,
    },
};
use std::collections::HashSet;
use tracing::debug;

/// Picks the datacenter to report on.
///
/// A requested name matches a datacenter name first, then an inventory path
/// (`Folder/DC01`). Without a name the only datacenter is used; with zero or
/// several candidates the selection fails with `NotFound`.
pub fn select_datacenter(
    datacenters: &[DatacenterRef],
    requested: Option<&str>,
) -> VsphereResult<DatacenterRef> {
    match requested {
        Some(name) => datacenters
            .iter()
            .find(|dc| dc.name == name)
            .or_else(|| {
                datacenters
                    .iter()
                    .find(|dc| dc.inventory_path == name.trim_matches('/'))
            })
            .cloned()
            .ok_or_else(|| VsphereError::NotFound(format!("datacenter '{}' not found", name))),
        None => match datacenters {
            [only] => Ok(only.clone()),
            [] => Err(VsphereError::NotFound("no datacenters found".to_string())),
            _ => Err(VsphereError::NotFound(
                "default datacenter resolves to multiple instances".to_string(),
            )),
        },
    }
}

/// Locates the datacenter's datastore folders.
///
/// Each entry of `DATASTORE_FOLDER_LOOKUPS` is tried in order and the first
/// successful, non-empty result is returned. When every lookup comes back
/// empty the result is empty; when none succeeds the last error is returned.
pub async fn discover_datastore_folders<C>(
    client: &C,
    datacenter: &DatacenterRef,
) -> VsphereResult<Vec<ManagedObjectReference>>
where
    C: InventoryClient + ?Sized,
{
    let mut last_error = None;
    let mut any_succeeded = false;

    for lookup in DATASTORE_FOLDER_LOOKUPS {
        match client.find_datastore_folders(datacenter, lookup).await {
            Ok(folders) if !folders.is_empty() => {
                debug!(?lookup, count = folders.len(), "found datastore folders");
                return Ok(folders);
            }
            Ok(_) => {
                any_succeeded = true;
                debug!(?lookup, "no datastore folder for lookup");
            }
            Err(e) => {
                debug!(?lookup, error = %e, "datastore folder lookup failed");
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if !any_succeeded => Err(e),
        _ => Ok(Vec::new()),
    }
}

/// Lists the datastore clusters of a datacenter in discovery order.
///
/// Folders whose children cannot be listed are skipped. A pod reachable
/// through several folders is reported once.
pub async fn discover_storage_pods<C>(
    client: &C,
    datacenter: &DatacenterRef,
) -> VsphereResult<Vec<StoragePod>>
where
    C: InventoryClient + ?Sized,
{
    let folders = discover_datastore_folders(client, datacenter).await?;
    let mut seen = HashSet::new();
    let mut pods = Vec::new();

    for folder in &folders {
        match client.list_storage_pods(folder).await {
            Ok(found) => pods.extend(
                found
                    .into_iter()
                    .filter(|pod| seen.insert(pod.reference.value.clone())),
            ),
            Err(e) => debug!(folder = %folder, error = %e, "skipping datastore folder"),
        }
    }

    debug!(datacenter = %datacenter.name, count = pods.len(), "discovered storage pods");
    Ok(pods)
}
