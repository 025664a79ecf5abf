use crate::{
    InventoryClient, VsphereClient,
    config::OutputFormat,
    core::domain::{
        inventory_client::FolderLookup,
        model::{
            inventory::{ClusterRef, DatacenterRef},
            managed_object::{ManagedObjectReference, ServiceContent},
            vsphere_session::VsphereSession,
        },
        value_object::{SESSION_HEADER, VsphereSessionId},
    },
    report::ReportWriter,
    topology::survey,
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

const API: &str = "/sdk/vim25/8.0.1.0";
const GIB: i64 = 1024 * 1024 * 1024;

async fn create_authenticated_client(mock_server: &MockServer) -> VsphereClient {
    let client = VsphereClient::builder()
        .url(mock_server.uri())
        .unwrap()
        .credentials("administrator@vsphere.local", "VMware1!")
        .unwrap()
        .build()
        .unwrap();

    // Set a session directly; login is covered by the login service tests.
    let session = VsphereSession::new(
        VsphereSessionId::new_unchecked("test-session".to_string()),
        ServiceContent {
            root_folder: ManagedObjectReference::new("Folder", "group-d1"),
            session_manager: ManagedObjectReference::new("SessionManager", "SessionManager"),
            search_index: ManagedObjectReference::new("SearchIndex", "SearchIndex"),
        },
    );
    client.api_client.set_session(session).await;
    client
}

fn mo(kind: &str, value: &str) -> Value {
    json!({"_typeName": "ManagedObjectReference", "type": kind, "value": value})
}

async fn mount_property(server: &MockServer, kind: &str, id: &str, property: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{}/{}/{}/{}", API, kind, id, property)))
        .and(header(SESSION_HEADER, "test-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_summary(server: &MockServer, id: &str, name: &str, capacity_gib: i64, free_gib: i64) {
    mount_property(
        server,
        "Datastore",
        id,
        "summary",
        json!({
            "_typeName": "DatastoreSummary",
            "datastore": mo("Datastore", id),
            "name": name,
            "url": format!("ds:///vmfs/volumes/{}/", id),
            "capacity": capacity_gib * GIB,
            "freeSpace": free_gib * GIB,
            "type": "VMFS",
            "accessible": true
        }),
    )
    .await;
}

fn datacenter(name: &str, id: &str, inventory_path: &str) -> DatacenterRef {
    DatacenterRef {
        name: name.to_string(),
        reference: ManagedObjectReference::new("Datacenter", id),
        inventory_path: inventory_path.to_string(),
    }
}

#[tokio::test]
async fn test_list_datacenters_walks_folders() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    mount_property(
        &mock_server,
        "Folder",
        "group-d1",
        "childEntity",
        json!([mo("Datacenter", "datacenter-3"), mo("Folder", "group-d20")]),
    )
    .await;
    mount_property(&mock_server, "Datacenter", "datacenter-3", "name", json!("DC01")).await;
    mount_property(&mock_server, "Folder", "group-d20", "name", json!("EMEA")).await;
    mount_property(
        &mock_server,
        "Folder",
        "group-d20",
        "childEntity",
        json!([mo("Datacenter", "datacenter-21")]),
    )
    .await;
    mount_property(&mock_server, "Datacenter", "datacenter-21", "name", json!("DC02")).await;

    let datacenters = client.list_datacenters().await.unwrap();
    assert_eq!(
        datacenters,
        vec![
            datacenter("DC01", "datacenter-3", "DC01"),
            datacenter("DC02", "datacenter-21", "EMEA/DC02"),
        ]
    );
}

#[tokio::test]
async fn test_list_clusters_skips_standalone_hosts() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    mount_property(
        &mock_server,
        "Datacenter",
        "datacenter-3",
        "hostFolder",
        mo("Folder", "group-h4"),
    )
    .await;
    mount_property(
        &mock_server,
        "Folder",
        "group-h4",
        "childEntity",
        json!([
            mo("ClusterComputeResource", "domain-c7"),
            mo("ComputeResource", "domain-s9"),
            mo("Folder", "group-h10")
        ]),
    )
    .await;
    mount_property(
        &mock_server,
        "Folder",
        "group-h10",
        "childEntity",
        json!([mo("ClusterComputeResource", "domain-c11")]),
    )
    .await;
    mount_property(&mock_server, "ClusterComputeResource", "domain-c7", "name", json!("Cluster01")).await;
    mount_property(&mock_server, "ClusterComputeResource", "domain-c11", "name", json!("Edge")).await;

    let clusters = client
        .list_clusters(&datacenter("DC01", "datacenter-3", "DC01"))
        .await
        .unwrap();
    let names: Vec<&str> = clusters.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Cluster01", "Edge"]);
    assert_eq!(clusters[1].reference.value, "domain-c11");
}

#[tokio::test]
async fn test_find_datastore_folders_by_lookup() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    let dc = datacenter("DC02", "datacenter-21", "EMEA/DC02");

    Mock::given(method("POST"))
        .and(path(format!("{}/SearchIndex/SearchIndex/FindChild", API)))
        .and(body_json(json!({"entity": mo("Datacenter", "datacenter-21"), "name": "datastore"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(mo("Folder", "group-s22")))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{}/SearchIndex/SearchIndex/FindChild", API)))
        .and(body_json(json!({"entity": mo("Datacenter", "datacenter-21"), "name": "datastores"})))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{}/SearchIndex/SearchIndex/FindByInventoryPath", API)))
        .and(body_json(json!({"inventoryPath": "EMEA/DC02/datastore"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(mo("Datastore", "datastore-5")))
        .mount(&mock_server)
        .await;

    let relative = client
        .find_datastore_folders(&dc, FolderLookup::Relative("datastore"))
        .await
        .unwrap();
    assert_eq!(relative, vec![ManagedObjectReference::new("Folder", "group-s22")]);

    let missing = client
        .find_datastore_folders(&dc, FolderLookup::Relative("datastores"))
        .await
        .unwrap();
    assert!(missing.is_empty());

    // Something other than a folder at the path is not a datastore folder.
    let not_folder = client
        .find_datastore_folders(&dc, FolderLookup::InventoryPath)
        .await
        .unwrap();
    assert!(not_folder.is_empty());
}

#[tokio::test]
async fn test_list_storage_pods_skips_unreadable_pod() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    mount_property(
        &mock_server,
        "Folder",
        "group-s5",
        "childEntity",
        json!([
            mo("StoragePod", "group-p1"),
            mo("Datastore", "datastore-14"),
            mo("StoragePod", "group-p2")
        ]),
    )
    .await;
    mount_property(&mock_server, "StoragePod", "group-p1", "name", json!("StoragePod01")).await;
    mount_property(
        &mock_server,
        "StoragePod",
        "group-p1",
        "childEntity",
        json!([mo("Datastore", "datastore-11"), mo("Datastore", "datastore-12")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/StoragePod/group-p2/name", API)))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "_typeName": "NoPermission",
            "faultstring": "Permission to perform this operation was denied."
        })))
        .mount(&mock_server)
        .await;

    let pods = client
        .list_storage_pods(&ManagedObjectReference::new("Folder", "group-s5"))
        .await
        .unwrap();
    assert_eq!(pods.len(), 1);
    assert_eq!(pods[0].name, "StoragePod01");
    assert_eq!(
        pods[0].members,
        vec![
            ManagedObjectReference::new("Datastore", "datastore-11"),
            ManagedObjectReference::new("Datastore", "datastore-12"),
        ]
    );
}

#[tokio::test]
async fn test_datastore_details_keep_request_order() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    mount_summary(&mock_server, "datastore-12", "B", 4096, 2048).await;
    mount_summary(&mock_server, "datastore-11", "A", 2048, 1024).await;

    let refs = [
        ManagedObjectReference::new("Datastore", "datastore-12"),
        ManagedObjectReference::new("Datastore", "datastore-11"),
    ];
    let details = client.get_datastore_details(&refs).await.unwrap();
    let names: Vec<&str> = details.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["B", "A"]);
    assert_eq!(details[1].capacity, 2048 * 1024 * 1024 * 1024);
    assert_eq!(details[1].reference.value, "datastore-11");
}

#[tokio::test]
async fn test_inaccessible_datastore_reports_zero_sizes() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    mount_property(
        &mock_server,
        "Datastore",
        "datastore-19",
        "summary",
        json!({
            "_typeName": "DatastoreSummary",
            "name": "nfs-gone",
            "capacity": -1,
            "freeSpace": -1,
            "type": "NFS",
            "accessible": false
        }),
    )
    .await;

    let details = client
        .get_datastore_details(&[ManagedObjectReference::new("Datastore", "datastore-19")])
        .await
        .unwrap();
    assert_eq!(details[0].name, "nfs-gone");
    assert_eq!(details[0].capacity, 0);
    assert_eq!(details[0].free_space, 0);
}

#[tokio::test]
async fn test_cluster_datastores_error_propagates() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;

    let cluster = ClusterRef {
        name: "Cluster01".to_string(),
        reference: ManagedObjectReference::new("ClusterComputeResource", "domain-c7"),
    };
    assert!(client.get_cluster_datastores(&cluster).await.is_err());
}

/// Mounts the DC01 inventory: one cluster reaching A, B, C and D; pod
/// StoragePod01 = {A, B}, StoragePod02 = {C}.
async fn mount_dc01_inventory(server: &MockServer) {
    mount_property(server, "Datacenter", "datacenter-3", "hostFolder", mo("Folder", "group-h4")).await;
    mount_property(
        server,
        "Folder",
        "group-h4",
        "childEntity",
        json!([mo("ClusterComputeResource", "domain-c7")]),
    )
    .await;
    mount_property(server, "ClusterComputeResource", "domain-c7", "name", json!("Cluster01")).await;

    Mock::given(method("POST"))
        .and(path(format!("{}/SearchIndex/SearchIndex/FindChild", API)))
        .and(body_json(json!({"entity": mo("Datacenter", "datacenter-3"), "name": "datastores"})))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{}/SearchIndex/SearchIndex/FindChild", API)))
        .and(body_json(json!({"entity": mo("Datacenter", "datacenter-3"), "name": "datastore"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(mo("Folder", "group-s5")))
        .mount(server)
        .await;
    mount_property(
        server,
        "Folder",
        "group-s5",
        "childEntity",
        json!([
            mo("StoragePod", "group-p1"),
            mo("StoragePod", "group-p2"),
            mo("Datastore", "datastore-14")
        ]),
    )
    .await;
    mount_property(server, "StoragePod", "group-p1", "name", json!("StoragePod01")).await;
    mount_property(
        server,
        "StoragePod",
        "group-p1",
        "childEntity",
        json!([mo("Datastore", "datastore-11"), mo("Datastore", "datastore-12")]),
    )
    .await;
    mount_property(server, "StoragePod", "group-p2", "name", json!("StoragePod02")).await;
    mount_property(
        server,
        "StoragePod",
        "group-p2",
        "childEntity",
        json!([mo("Datastore", "datastore-13")]),
    )
    .await;

    mount_property(
        server,
        "ClusterComputeResource",
        "domain-c7",
        "datastore",
        json!([
            mo("Datastore", "datastore-11"),
            mo("Datastore", "datastore-12"),
            mo("Datastore", "datastore-13"),
            mo("Datastore", "datastore-14")
        ]),
    )
    .await;
    mount_summary(server, "datastore-11", "A", 2048, 1024).await;
    mount_summary(server, "datastore-12", "B", 4096, 2048).await;
    mount_summary(server, "datastore-13", "C", 1024, 512).await;
    mount_summary(server, "datastore-14", "D", 8192, 4096).await;
}

#[tokio::test]
async fn test_dc01_report_json() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    mount_dc01_inventory(&mock_server).await;

    let dc = datacenter("DC01", "datacenter-3", "DC01");
    let mut writer = ReportWriter::new(OutputFormat::Json, "DC01", Vec::new());
    survey(&client, &dc, &mut writer).await.unwrap();

    let document: Value = serde_json::from_slice(&writer.into_inner()).unwrap();
    assert_eq!(
        document,
        json!({
            "datacenter": "DC01",
            "clusters": [{
                "name": "Cluster01",
                "datastore_clusters": [
                    {"name": "StoragePod01", "datastores": [
                        {"name": "A", "capacity_gb": 2048.0, "free_space_gb": 1024.0},
                        {"name": "B", "capacity_gb": 4096.0, "free_space_gb": 2048.0}
                    ]},
                    {"name": "StoragePod02", "datastores": [
                        {"name": "C", "capacity_gb": 1024.0, "free_space_gb": 512.0}
                    ]}
                ],
                "standalone_datastores": [
                    {"name": "D", "capacity_gb": 8192.0, "free_space_gb": 4096.0}
                ]
            }]
        })
    );
}

#[tokio::test]
async fn test_dc01_report_text() {
    let mock_server = MockServer::start().await;
    let client = create_authenticated_client(&mock_server).await;
    mount_dc01_inventory(&mock_server).await;

    let dc = datacenter("DC01", "datacenter-3", "DC01");
    let mut writer = ReportWriter::new(OutputFormat::Text, "DC01", Vec::new());
    survey(&client, &dc, &mut writer).await.unwrap();

    let text = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(
        text,
        "Using datacenter: DC01\n\
         \n\
         Cluster: Cluster01\n\
         ------------------\n\
         \x20 Datastore Cluster: StoragePod01\n\
         \x20   - A (Capacity: 2048.00 GB, Free: 1024.00 GB)\n\
         \x20   - B (Capacity: 4096.00 GB, Free: 2048.00 GB)\n\
         \x20 Datastore Cluster: StoragePod02\n\
         \x20   - C (Capacity: 1024.00 GB, Free: 512.00 GB)\n\
         \x20 Standalone Datastores:\n\
         \x20   - D (Capacity: 8192.00 GB, Free: 4096.00 GB)\n"
    );
}
