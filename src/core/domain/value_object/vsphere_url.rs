use crate::core::domain::error::ValidationError;
use url::Url;

/// Maximum accepted URL length (RFC 7230 practical limit).
const MAX_URL_LENGTH: usize = 2083;

/// A validated vCenter base URL.
///
/// Only the scheme, host and port are kept: `https://vcenter.example.com/sdk`
/// and `vcenter.example.com` both normalize to `https://vcenter.example.com`.
#[derive(Debug, Clone, PartialEq)]
pub struct VsphereUrl(Url);

impl VsphereUrl {
    /// Creates a new URL without validation.
    pub(crate) fn new_unchecked(url: Url) -> Self {
        Self(url)
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Returns the host name.
    #[must_use]
    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    /// Joins an API path onto the base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.as_str(), path.trim_start_matches('/'))
    }
}

/// Validates and normalizes a vCenter URL.
pub(crate) fn parse_url(raw: &str) -> Result<Url, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }
    if raw.len() > MAX_URL_LENGTH {
        return Err(ValidationError::Format(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let mut parsed = Url::parse(&with_scheme)
        .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

    if !matches!(parsed.scheme(), "https" | "http") {
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme '{}'. Must be one of: https, http",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL must contain a host".to_string(),
        });
    }

    // Credentials embedded in the URL are never used; the session is opened
    // with the explicit username and password.
    parsed
        .set_username("")
        .map_err(|_| ValidationError::Format("URL cannot carry credentials".to_string()))?;
    parsed
        .set_password(None)
        .map_err(|_| ValidationError::Format("URL cannot carry credentials".to_string()))?;
    parsed.set_path("/");
    parsed.set_query(None);
    parsed.set_fragment(None);

    Ok(parsed)
}
