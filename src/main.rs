//! vsphere-storage-inventory
//!
//! Prints the datastore clusters and standalone datastores of every compute
//! cluster in a vSphere datacenter, as text or JSON.

use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vsphere_storage_inventory::{
    InventoryClient, VsphereClient, VsphereError, VsphereResult,
    config::{Args, ReportConfig},
    report::{ReportWriter, datacenter_choice_lines},
    topology::{select_datacenter, survey},
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = ReportConfig::from(Args::parse());

    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let client = match connect(&config).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error connecting to vSphere: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = run(&client, &config).await;

    if let Err(e) = client.logout().await {
        warn!(error = %e, "logout failed");
    }
    code
}

async fn connect(config: &ReportConfig) -> VsphereResult<VsphereClient> {
    let client = VsphereClient::builder()
        .url(&config.url)?
        .credentials(&config.username, &config.password)?
        .api_release(&config.api_release)
        .insecure(config.insecure)
        .rate_limit(config.rate_limit)
        .build()?;
    client.login().await?;
    info!(host = client.host(), "connected");
    Ok(client)
}

async fn run(client: &VsphereClient, config: &ReportConfig) -> ExitCode {
    let datacenters = match client.list_datacenters().await {
        Ok(datacenters) => datacenters,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let datacenter = match select_datacenter(&datacenters, config.datacenter.as_deref()) {
        Ok(datacenter) => datacenter,
        Err(e) => {
            info!(error = %e, "no datacenter selected");
            for line in datacenter_choice_lines(&datacenters) {
                println!("{}", line);
            }
            return ExitCode::FAILURE;
        }
    };
    info!(datacenter = %datacenter.name, path = %datacenter.inventory_path, "using datacenter");

    let mut writer = ReportWriter::new(config.output, &datacenter.name, io::stdout());
    match survey(client, &datacenter, &mut writer).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ VsphereError::ClusterListing { .. }) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
