//! Command line arguments and the immutable run configuration.

use crate::core::{domain::value_object::DEFAULT_API_RELEASE, infrastructure::api_client::RateLimitConfig};
use clap::{ArgAction, Parser, ValueEnum};
use std::num::NonZeroU32;

/// Report rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Indented human-readable text, streamed per cluster
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// List vSphere datastore clusters and standalone datastores per compute cluster
#[derive(Parser, Debug)]
#[command(name = "vsphere-storage-inventory", version, about, long_about = None)]
pub struct Args {
    /// vCenter URL or host name
    #[arg(long, env = "VSPHERE_URL")]
    pub url: String,

    /// vCenter username
    #[arg(long, env = "VSPHERE_USERNAME")]
    pub username: String,

    /// vCenter password
    #[arg(long, env = "VSPHERE_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Datacenter to report on (defaults to the only datacenter)
    #[arg(long, env = "VSPHERE_DATACENTER")]
    pub datacenter: Option<String>,

    /// Skip verification of the server certificate
    #[arg(
        long,
        env = "VSPHERE_INSECURE",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub insecure: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// VI/JSON API release
    #[arg(long, env = "VSPHERE_API_RELEASE", default_value = DEFAULT_API_RELEASE)]
    pub api_release: String,

    /// Throttle API calls to this many requests per second
    #[arg(long, env = "VSPHERE_MAX_REQUESTS_PER_SECOND")]
    pub max_requests_per_second: Option<NonZeroU32>,
}

/// Settings for one run, built once at startup.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    pub datacenter: Option<String>,
    pub insecure: bool,
    pub output: OutputFormat,
    pub api_release: String,
    pub rate_limit: Option<RateLimitConfig>,
}

impl From<Args> for ReportConfig {
    fn from(args: Args) -> Self {
        Self {
            url: args.url,
            username: args.username,
            password: args.password,
            datacenter: args.datacenter.filter(|dc| !dc.trim().is_empty()),
            insecure: args.insecure,
            output: args.output,
            api_release: args.api_release,
            rate_limit: args.max_requests_per_second.map(|rps| RateLimitConfig {
                requests_per_second: rps,
                burst_size: rps,
            }),
        }
    }
}
