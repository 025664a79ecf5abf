use crate::core::domain::error::ValidationError;

/// A validated vSphere username (e.g. `administrator@vsphere.local`).
#[derive(Debug, Clone, PartialEq)]
pub struct VsphereUsername(String);

impl VsphereUsername {
    /// Creates a new username without validation.
    pub(crate) fn new_unchecked(username: String) -> Self {
        Self(username)
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validates a username. SSO (`user@domain`) and Windows (`DOMAIN\user`)
/// forms are both accepted.
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::Field {
            field: "username".to_string(),
            message: "Username cannot be empty".to_string(),
        });
    }
    if username.len() > 256 {
        return Err(ValidationError::Format(format!(
            "Username cannot exceed 256 characters (got {})",
            username.len()
        )));
    }
    if username.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(ValidationError::Format(
            "Username cannot contain whitespace or control characters".to_string(),
        ));
    }
    Ok(())
}
