//! Pure formatting of the report model.
//!
//! Text output is line oriented so a cluster can be printed as soon as it is
//! resolved; JSON output is a single document built from the full model.

use crate::core::domain::{
    error::VsphereResult,
    model::{
        inventory::DatacenterRef,
        report::{ClusterReport, DatacenterReport, DatastoreEntry},
    },
};

/// `    - <name> (Capacity: X.XX GB, Free: Y.YY GB)`
#[must_use]
pub fn datastore_line(entry: &DatastoreEntry) -> String {
    format!(
        "    - {} (Capacity: {:.2} GB, Free: {:.2} GB)",
        entry.name, entry.capacity_gb, entry.free_space_gb
    )
}

/// Text lines for one cluster, starting with the blank separator line.
#[must_use]
pub fn cluster_lines(cluster: &ClusterReport) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("Cluster: {}", cluster.name),
        "-".repeat(cluster.name.len() + 9),
    ];

    if let Some(failure) = &cluster.failure {
        lines.push(format!(
            "  Error {}: {}",
            failure.stage.describe(),
            failure.message
        ));
        return lines;
    }

    if cluster.datastore_clusters.is_empty() {
        lines.push("  No datastore clusters found for this cluster".to_string());
    }
    for datastore_cluster in &cluster.datastore_clusters {
        lines.push(format!("  Datastore Cluster: {}", datastore_cluster.name));
        if datastore_cluster.is_empty() {
            lines.push("    No datastores from this cluster in this datastore cluster".to_string());
        }
        lines.extend(datastore_cluster.datastores.iter().map(datastore_line));
    }

    lines.push("  Standalone Datastores:".to_string());
    if cluster.standalone_datastores.is_empty() {
        lines.push("    No standalone datastores found".to_string());
    }
    lines.extend(cluster.standalone_datastores.iter().map(datastore_line));

    lines
}

/// Pretty-printed JSON document of the whole report.
pub fn render_json(report: &DatacenterReport) -> VsphereResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Lines printed when no datacenter could be selected.
#[must_use]
pub fn datacenter_choice_lines(datacenters: &[DatacenterRef]) -> Vec<String> {
    if datacenters.is_empty() {
        return vec!["No datacenters found. Please check your vSphere environment.".to_string()];
    }
    let mut lines = vec!["Available datacenters:".to_string()];
    lines.extend(datacenters.iter().map(|dc| format!("- {}", dc.name)));
    lines.push(String::new());
    lines.push("Please specify a datacenter using the --datacenter flag.".to_string());
    lines
}
