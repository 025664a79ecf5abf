use crate::core::domain::error::ValidationError;

/// Release used when none is configured; the first release shipping VI/JSON.
pub const DEFAULT_API_RELEASE: &str = "8.0.1.0";

/// The VI/JSON API release segment of `/sdk/vim25/{release}/`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRelease(String);

impl ApiRelease {
    /// Creates a new release without validation.
    pub(crate) fn new_unchecked(release: String) -> Self {
        Self(release)
    }

    /// Returns the release as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApiRelease {
    fn default() -> Self {
        Self(DEFAULT_API_RELEASE.to_string())
    }
}

/// Validates a dotted numeric release such as `8.0.2.0`.
pub(crate) fn validate_api_release(release: &str) -> Result<(), ValidationError> {
    let parts: Vec<&str> = release.split('.').collect();
    if parts.len() < 2 || parts.len() > 4 {
        return Err(ValidationError::Format(format!(
            "API release '{}' must have between 2 and 4 dotted components",
            release
        )));
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(ValidationError::Format(format!(
            "API release '{}' must be numeric",
            release
        )));
    }
    Ok(())
}
