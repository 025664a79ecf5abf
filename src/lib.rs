//! Read-only storage topology report for vSphere.
//!
//! Lists, for each compute cluster of a datacenter, the datastore clusters
//! (storage pods) and the standalone datastores reachable by the cluster,
//! with capacity and free space.

mod auth;
pub mod config;
pub mod core;
pub mod report;
pub mod topology;


pub use crate::core::domain::error::{ValidationError, VsphereError, VsphereResult};
pub use crate::core::domain::inventory_client::{FolderLookup, InventoryClient};
pub use crate::core::infrastructure::api_client::{ClientConfig, RateLimitConfig};
use crate::core::{
    domain::{
        model::vsphere_connection::VsphereConnection,
        value_object::{
            ApiRelease, VspherePassword, VsphereUrl, VsphereUsername, parse_url,
            validate_api_release, validate_password, validate_username,
        },
    },
    infrastructure::api_client::ApiClient,
};

/// A client for reading the vSphere inventory
///
/// The client speaks the VI/JSON API (`/sdk/vim25/{release}/...`) and
/// implements [`InventoryClient`]. It only ever reads inventory properties.
///
/// # Examples
///
/// ```no_run
/// use vsphere_storage_inventory::{VsphereClient, VsphereResult};
///
/// #[tokio::main]
/// async fn main() -> VsphereResult<()> {
///     let client = VsphereClient::builder()
///         .url("vcenter.example.com")?
///         .credentials("administrator@vsphere.local", "password")?
///         .insecure(true)
///         .build()?;
///
///     client.login().await?;
///     client.logout().await?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct VsphereClient {
    api_client: ApiClient,
}

/// Builder for VsphereClient configuration
#[derive(Debug, Default)]
pub struct VsphereClientBuilder {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    api_release: Option<String>,
    insecure: bool,
    rate_limit: Option<RateLimitConfig>,
}

impl VsphereClientBuilder {
    pub fn url(mut self, url: impl Into<String>) -> VsphereResult<Self> {
        self.url = Some(url.into());
        Ok(self)
    }

    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> VsphereResult<Self> {
        self.username = Some(username.into());
        self.password = Some(password.into());
        Ok(self)
    }

    pub fn api_release(mut self, release: impl Into<String>) -> Self {
        self.api_release = Some(release.into());
        self
    }

    /// Skip certificate validation (self-signed vCenter certificates).
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn rate_limit(mut self, rate_limit: Option<RateLimitConfig>) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn build(self) -> VsphereResult<VsphereClient> {
        let url = self.url.ok_or_else(|| required("url"))?;
        let url = VsphereUrl::new_unchecked(parse_url(&url)?);

        let username = self.username.ok_or_else(|| required("username"))?;
        validate_username(&username)?;

        let password = self.password.ok_or_else(|| required("password"))?;
        validate_password(&password)?;

        let api_release = match self.api_release {
            Some(release) => {
                validate_api_release(&release)?;
                ApiRelease::new_unchecked(release)
            }
            None => ApiRelease::default(),
        };

        let connection = VsphereConnection::new(
            url,
            VsphereUsername::new_unchecked(username),
            VspherePassword::new_unchecked(password),
            api_release,
            self.insecure,
        );
        let config = ClientConfig {
            rate_limit: self.rate_limit,
        };

        Ok(VsphereClient {
            api_client: ApiClient::new(connection, config)?,
        })
    }
}

fn required(field: &str) -> VsphereError {
    ValidationError::Field {
        field: field.to_string(),
        message: format!("{} is required", field),
    }
    .into()
}

impl VsphereClient {
    /// Creates a new builder for VsphereClient configuration
    pub fn builder() -> VsphereClientBuilder {
        VsphereClientBuilder::default()
    }

    /// Opens a session with the configured credentials
    ///
    /// # Errors
    ///
    /// This method will return an error if:
    /// - The credentials are rejected
    /// - The server is unreachable
    /// - The API release is not served by this vCenter
    pub async fn login(&self) -> VsphereResult<()> {
        self.api_client.login().await
    }

    /// Closes the session, if one is open
    pub async fn logout(&self) -> VsphereResult<()> {
        self.api_client.logout().await
    }

    /// Returns true if a session is open
    pub async fn is_authenticated(&self) -> bool {
        self.api_client.is_authenticated().await
    }

    /// Host name of the vCenter this client talks to
    pub fn host(&self) -> &str {
        self.api_client.connection().url().host()
    }
}
