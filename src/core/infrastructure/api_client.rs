//! Internal HTTP client for the VI/JSON API.

use crate::{
    VsphereError, VsphereResult,
    auth::application::service::login_service::LoginService,
    core::domain::{
        model::{
            fault::VimFault,
            managed_object::{ManagedObjectReference, ServiceContent},
            vsphere_connection::VsphereConnection,
            vsphere_session::VsphereSession,
        },
        value_object::SESSION_HEADER,
    },
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{Client, StatusCode};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Client-side request throttling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: NonZeroU32,
    pub burst_size: NonZeroU32,
}

/// Tunables that are not part of the connection identity.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub rate_limit: Option<RateLimitConfig>,
}

/// Internal HTTP client that manages the session and provides typed access
/// to managed object properties and methods.
///
/// Every request carries the `vmware-api-session-id` header. A request
/// issued without a session logs in first; a `401` drops the session and
/// surfaces as an authentication error.
#[derive(Debug)]
pub struct ApiClient {
    http_client: Client,
    connection: Arc<VsphereConnection>,
    session: Arc<RwLock<Option<VsphereSession>>>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
}

impl ApiClient {
    /// Creates a new `ApiClient`. The client starts unauthenticated.
    ///
    /// # Errors
    /// Returns `VsphereError::Connection` if the HTTP client cannot be built.
    pub fn new(connection: VsphereConnection, config: ClientConfig) -> VsphereResult<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(connection.accept_invalid_certs())
            .build()
            .map_err(|e| VsphereError::Connection(e.to_string()))?;

        let rate_limiter = config.rate_limit.map(|rl| {
            let quota = Quota::per_second(rl.requests_per_second).allow_burst(rl.burst_size);
            Arc::new(DefaultDirectRateLimiter::direct(quota))
        });

        Ok(Self {
            http_client,
            connection: Arc::new(connection),
            session: Arc::new(RwLock::new(None)),
            rate_limiter,
        })
    }

    /// Returns a reference to the underlying connection details.
    pub fn connection(&self) -> &VsphereConnection {
        &self.connection
    }

    /// Sets the session state (used after a successful login).
    pub async fn set_session(&self, session: VsphereSession) {
        let mut lock = self.session.write().await;
        *lock = Some(session);
    }

    /// Returns the current session, if any.
    pub async fn session(&self) -> Option<VsphereSession> {
        self.session.read().await.clone()
    }

    /// Returns `true` if a session is open.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Opens a new session with the stored credentials.
    pub async fn login(&self) -> VsphereResult<()> {
        let session = LoginService::new()
            .execute(&self.http_client, &self.connection)
            .await?;
        self.set_session(session).await;
        Ok(())
    }

    /// Closes the current session. A missing session is not an error.
    pub async fn logout(&self) -> VsphereResult<()> {
        let Some(session) = self.session.write().await.take() else {
            return Ok(());
        };
        let url = self.connection.api_url(&format!(
            "SessionManager/{}/Logout",
            session.service_content().session_manager.value
        ));
        let response = self
            .http_client
            .post(&url)
            .header(SESSION_HEADER, session.session_id().as_str())
            .send()
            .await
            .map_err(|e| VsphereError::Connection(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, "logout was not acknowledged");
            return Err(VsphereError::Api {
                status: status.as_u16(),
                message: "Logout failed".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the service content of the current session, logging in if needed.
    pub async fn service_content(&self) -> VsphereResult<ServiceContent> {
        self.ensure_authenticated().await?;
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.service_content().clone())
            .ok_or_else(|| VsphereError::Authentication("No active session".to_string()))
    }

    /// Reads one property of a managed object (`GET <Type>/<id>/<property>`).
    ///
    /// # Errors
    /// Returns `VsphereError` if the request fails, the session is rejected,
    /// or the response cannot be parsed.
    pub async fn get_property<T>(
        &self,
        object: &ManagedObjectReference,
        property: &str,
    ) -> VsphereResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let path = format!("{}/{}/{}", object.kind, object.value, property);
        self.execute_request(reqwest::Method::GET, &path, None::<&()>)
            .await
    }

    /// Invokes a method on a managed object (`POST <Type>/<id>/<Method>`).
    ///
    /// # Errors
    /// Returns `VsphereError` if the request fails, the session is rejected,
    /// or the response cannot be parsed.
    pub async fn invoke<B, T>(
        &self,
        object: &ManagedObjectReference,
        method: &str,
        body: &B,
    ) -> VsphereResult<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        let path = format!("{}/{}/{}", object.kind, object.value, method);
        self.execute_request(reqwest::Method::POST, &path, Some(body))
            .await
    }

    /// Core request execution method. It ensures a session, sends the
    /// request and parses the response.
    async fn execute_request<B, T>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> VsphereResult<T>
    where
        B: serde::Serialize,
        T: serde::de::DeserializeOwned,
    {
        self.ensure_authenticated().await?;

        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = self.connection.api_url(path);
        debug!(%method, %url, "inventory request");
        let mut req_builder = self.http_client.request(method, &url);

        {
            let session_guard = self.session.read().await;
            if let Some(session) = session_guard.as_ref() {
                req_builder = req_builder.header(SESSION_HEADER, session.session_id().as_str());
            }
        }

        if let Some(body) = body {
            req_builder = req_builder.json(body);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| VsphereError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.session.write().await.take();
            return Err(VsphereError::Authentication(
                "Session is not authenticated or has expired".to_string(),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| VsphereError::Connection(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = VimFault::parse(&text)
                .map(|fault| fault.message().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            return Err(VsphereError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // Methods with no result answer 204 or an empty body.
        let text = if text.trim().is_empty() { "null" } else { &text };
        serde_json::from_str::<T>(text)
            .map_err(|e| VsphereError::Connection(format!("Failed to parse response: {}", e)))
    }

    /// Ensures that a session is open, logging in if it is not.
    async fn ensure_authenticated(&self) -> VsphereResult<()> {
        if !self.is_authenticated().await {
            self.login().await?;
        }
        Ok(())
    }
}
