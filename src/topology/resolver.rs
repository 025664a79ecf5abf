//! Classifies a cluster's reachable datastores into datastore clusters and
//! standalone datastores.

use crate::core::domain::model::{
    inventory::{DatastoreDetails, StoragePod},
    report::{ClusterReport, DatastoreClusterReport, DatastoreEntry},
};
use std::collections::{HashMap, HashSet};

fn entry(datastore: &DatastoreDetails) -> DatastoreEntry {
    DatastoreEntry::from_bytes(&datastore.name, datastore.capacity, datastore.free_space)
}

/// Builds the report of one cluster.
///
/// Datastores are matched by reference value, never by name. Each reachable
/// datastore is listed exactly once: under the first pod (in `pods` order)
/// whose members contain it, otherwise as standalone. Pod members that are
/// not reachable from this cluster, or are not datastores at all, are
/// ignored. Pods keep their discovery order and are kept even when empty.
pub fn resolve(
    cluster_name: &str,
    pods: &[StoragePod],
    datastores: &[DatastoreDetails],
) -> ClusterReport {
    let reachable: HashMap<&str, &DatastoreDetails> = datastores
        .iter()
        .map(|ds| (ds.reference.value.as_str(), ds))
        .collect();
    let mut claimed: HashSet<&str> = HashSet::with_capacity(datastores.len());
    let mut report = ClusterReport::new(cluster_name);

    for pod in pods {
        let mut bucket = Vec::new();
        for member in &pod.members {
            let Some(datastore) = reachable.get(member.value.as_str()) else {
                continue;
            };
            if claimed.insert(member.value.as_str()) {
                bucket.push(entry(datastore));
            }
        }
        report.datastore_clusters.push(DatastoreClusterReport {
            name: pod.name.clone(),
            datastores: bucket,
        });
    }

    for datastore in datastores {
        if claimed.insert(datastore.reference.value.as_str()) {
            report.standalone_datastores.push(entry(datastore));
        }
    }

    report
}
