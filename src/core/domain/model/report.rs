//! Report model: datacenter → clusters → datastore clusters / standalone datastores.
//!
//! The model is independent of rendering. Sizes are stored in GiB as `f64`
//! at full precision; rounding only happens in the text renderer.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Converts a byte count to binary gibibytes (`bytes / 1024³`).
#[must_use]
pub fn bytes_to_gib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GIB
}

/// One datastore line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatastoreEntry {
    pub name: String,
    pub capacity_gb: f64,
    pub free_space_gb: f64,
}

impl DatastoreEntry {
    pub fn from_bytes(name: impl Into<String>, capacity: u64, free_space: u64) -> Self {
        Self {
            name: name.into(),
            capacity_gb: bytes_to_gib(capacity),
            free_space_gb: bytes_to_gib(free_space),
        }
    }
}

/// A datastore cluster with the datastores it contributes to one compute cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatastoreClusterReport {
    pub name: String,
    pub datastores: Vec<DatastoreEntry>,
}

impl DatastoreClusterReport {
    /// `true` when none of the pod's members is reachable from the cluster.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datastores.is_empty()
    }
}

/// Where a degraded cluster pass stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Datastore folder or storage pod discovery failed.
    DatastoreFolders,
    /// The cluster's datastore list could not be read.
    ClusterDetails,
    /// Datastore names or capacities could not be read.
    DatastoreDetails,
}

impl FailureStage {
    /// Human-readable label used in the text report.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            FailureStage::DatastoreFolders => "finding datastore folders",
            FailureStage::ClusterDetails => "getting cluster details",
            FailureStage::DatastoreDetails => "retrieving datastore details",
        }
    }
}

/// Why a cluster's report body is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterFailure {
    pub stage: FailureStage,
    pub message: String,
}

/// Storage topology of one compute cluster.
///
/// `datastore_clusters` keeps every discovered pod, including those with no
/// datastore reachable from this cluster; the structured document omits the
/// empty ones. A degraded cluster carries `failure` and empty collections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterReport {
    pub name: String,
    #[serde(serialize_with = "serialize_populated")]
    pub datastore_clusters: Vec<DatastoreClusterReport>,
    pub standalone_datastores: Vec<DatastoreEntry>,
    #[serde(skip)]
    pub failure: Option<ClusterFailure>,
}

impl ClusterReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datastore_clusters: Vec::new(),
            standalone_datastores: Vec::new(),
            failure: None,
        }
    }

    /// A cluster whose pass was abandoned at `stage`.
    pub fn failed(name: impl Into<String>, stage: FailureStage, message: impl Into<String>) -> Self {
        Self {
            failure: Some(ClusterFailure {
                stage,
                message: message.into(),
            }),
            ..Self::new(name)
        }
    }

    /// Datastore clusters with at least one datastore from this cluster.
    pub fn populated_datastore_clusters(&self) -> impl Iterator<Item = &DatastoreClusterReport> {
        self.datastore_clusters.iter().filter(|dc| !dc.is_empty())
    }
}

fn serialize_populated<S>(clusters: &[DatastoreClusterReport], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let populated: Vec<&DatastoreClusterReport> =
        clusters.iter().filter(|dc| !dc.is_empty()).collect();
    let mut seq = serializer.serialize_seq(Some(populated.len()))?;
    for cluster in populated {
        seq.serialize_element(cluster)?;
    }
    seq.end()
}

/// The whole report for one datacenter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatacenterReport {
    pub datacenter: String,
    pub clusters: Vec<ClusterReport>,
}

impl DatacenterReport {
    pub fn new(datacenter: impl Into<String>) -> Self {
        Self {
            datacenter: datacenter.into(),
            clusters: Vec::new(),
        }
    }

    /// Appends a cluster in arrival order.
    pub fn push(&mut self, cluster: ClusterReport) {
        self.clusters.push(cluster);
    }
}
