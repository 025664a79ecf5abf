//! One sequential pass over a datacenter's clusters.

use super::{discovery::discover_storage_pods, resolver::resolve};
use crate::{
    core::domain::{
        error::{VsphereError, VsphereResult},
        inventory_client::InventoryClient,
        model::{
            inventory::{ClusterRef, DatacenterRef, StoragePod},
            report::{ClusterReport, FailureStage},
        },
    },
    report::ReportWriter,
};
use std::io::Write;
use tracing::{info, warn};

/// Reports every cluster of `datacenter` through `writer`.
///
/// Storage pods are discovered once for the datacenter. A failure while
/// discovering them, or while reading one cluster's datastores, degrades
/// only the affected clusters; listing the clusters themselves is fatal.
pub async fn survey<C, W>(
    client: &C,
    datacenter: &DatacenterRef,
    writer: &mut ReportWriter<W>,
) -> VsphereResult<()>
where
    C: InventoryClient + ?Sized,
    W: Write,
{
    writer.begin()?;

    let clusters = client
        .list_clusters(datacenter)
        .await
        .map_err(|e| VsphereError::ClusterListing {
            source: Box::new(e),
        })?;
    if clusters.is_empty() {
        info!(datacenter = %datacenter.name, "no clusters found");
        writer.no_clusters()?;
        return writer.finish();
    }

    let pods = discover_storage_pods(client, datacenter).await;
    if let Err(e) = &pods {
        warn!(datacenter = %datacenter.name, error = %e, "storage pod discovery failed");
    }

    for cluster in &clusters {
        let report = survey_cluster(client, cluster, &pods).await;
        if let Some(failure) = &report.failure {
            warn!(
                cluster = %cluster.name,
                stage = failure.stage.describe(),
                error = %failure.message,
                "cluster report degraded"
            );
        }
        writer.push(report)?;
    }

    writer.finish()
}

async fn survey_cluster<C>(
    client: &C,
    cluster: &ClusterRef,
    pods: &Result<Vec<StoragePod>, VsphereError>,
) -> ClusterReport
where
    C: InventoryClient + ?Sized,
{
    let pods = match pods {
        Ok(pods) => pods,
        Err(e) => {
            return ClusterReport::failed(&cluster.name, FailureStage::DatastoreFolders, e.to_string());
        }
    };

    let datastores = match client.get_cluster_datastores(cluster).await {
        Ok(datastores) => datastores,
        Err(e) => {
            return ClusterReport::failed(&cluster.name, FailureStage::ClusterDetails, e.to_string());
        }
    };

    let details = if datastores.is_empty() {
        Vec::new()
    } else {
        match client.get_datastore_details(&datastores).await {
            Ok(details) => details,
            Err(e) => {
                return ClusterReport::failed(
                    &cluster.name,
                    FailureStage::DatastoreDetails,
                    e.to_string(),
                );
            }
        }
    };

    resolve(&cluster.name, pods, &details)
}
