use crate::{
    auth::application::{
        request::login_request::LoginRequest, response::login_response::LoginResponse,
    },
    core::domain::{
        error::{VsphereError, VsphereResult},
        model::{
            fault::VimFault, managed_object::ServiceContent,
            vsphere_connection::VsphereConnection, vsphere_session::VsphereSession,
        },
        value_object::{SESSION_HEADER, VsphereSessionId, validate_session_id},
    },
};

use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use tracing::{debug, info};

/// Opens a VI/JSON session: reads the service content, then logs in
/// through the session manager it names.
pub struct LoginService {
    default_headers: HeaderMap,
}

impl LoginService {
    pub fn new() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self { default_headers }
    }

    pub async fn execute(
        &self,
        client: &Client,
        connection: &VsphereConnection,
    ) -> VsphereResult<VsphereSession> {
        let service_content = self.fetch_service_content(client, connection).await?;
        let url = connection.api_url(&format!(
            "SessionManager/{}/Login",
            service_content.session_manager.value
        ));
        let request = self.build_login_request(connection);
        let response = self.send_request(client, &url, &request).await?;

        match response.status() {
            StatusCode::OK => {
                self.handle_successful_login(response, service_content)
                    .await
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(VsphereError::Authentication(
                "Invalid credentials provided".to_string(),
            )),
            StatusCode::NOT_FOUND => Err(VsphereError::Connection(
                "Login endpoint not found (is the API release supported?)".to_string(),
            )),
            StatusCode::SERVICE_UNAVAILABLE => Err(VsphereError::Connection(
                "vCenter service is currently unavailable".to_string(),
            )),
            status => {
                let body = response.text().await.unwrap_or_default();
                match VimFault::parse(&body) {
                    Some(fault) if fault.is_invalid_login() => {
                        Err(VsphereError::Authentication(fault.message().to_string()))
                    }
                    Some(fault) => Err(VsphereError::Api {
                        status: status.as_u16(),
                        message: fault.message().to_string(),
                    }),
                    None => Err(VsphereError::Connection(format!(
                        "Unexpected response status: {}",
                        status
                    ))),
                }
            }
        }
    }

    async fn fetch_service_content(
        &self,
        client: &Client,
        connection: &VsphereConnection,
    ) -> VsphereResult<ServiceContent> {
        let url = connection.api_url("ServiceInstance/ServiceInstance/content");
        debug!(%url, "fetching service content");
        let response = client
            .get(&url)
            .headers(self.default_headers.clone())
            .send()
            .await
            .map_err(|e| VsphereError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(VsphereError::Connection(format!(
                "Service content unavailable ({})",
                response.status()
            )));
        }

        response.json::<ServiceContent>().await.map_err(|e| {
            VsphereError::Connection(format!("Failed to parse service content: {}", e))
        })
    }

    fn build_login_request(&self, connection: &VsphereConnection) -> LoginRequest {
        LoginRequest {
            user_name: connection.username().as_str().to_string(),
            password: connection.password().as_str().to_string(),
        }
    }

    async fn send_request(
        &self,
        client: &Client,
        url: &str,
        request: &LoginRequest,
    ) -> VsphereResult<reqwest::Response> {
        client
            .post(url)
            .headers(self.default_headers.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| VsphereError::Connection(e.to_string()))
    }

    async fn handle_successful_login(
        &self,
        response: reqwest::Response,
        service_content: ServiceContent,
    ) -> VsphereResult<VsphereSession> {
        let session_id = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                VsphereError::Authentication(format!(
                    "Login response did not carry a {} header",
                    SESSION_HEADER
                ))
            })?;
        validate_session_id(&session_id)?;

        let login_response = response.json::<LoginResponse>().await.map_err(|e| {
            VsphereError::Connection(format!("Failed to parse login response: {}", e))
        })?;
        info!(
            user = %login_response.user_name,
            full_name = login_response.full_name.as_deref().unwrap_or_default(),
            "logged in"
        );

        Ok(VsphereSession::new(
            VsphereSessionId::new_unchecked(session_id),
            service_content,
        ))
    }
}

impl Default for LoginService {
    fn default() -> Self {
        Self::new()
    }
}
