use crate::core::domain::error::ValidationError;

/// A vSphere password (plaintext, only kept for the login call).
#[derive(Clone)]
pub struct VspherePassword(String);

impl VspherePassword {
    /// Creates a new password without validation.
    pub(crate) fn new_unchecked(password: String) -> Self {
        Self(password)
    }

    /// Returns the password as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for VspherePassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VspherePassword(***)")
    }
}

/// Validates a password. Strength is the directory's concern, not ours.
pub(crate) fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Field {
            field: "password".to_string(),
            message: "Password cannot be empty".to_string(),
        });
    }
    if password.len() > 512 {
        return Err(ValidationError::Format(
            "Password cannot exceed 512 characters".to_string(),
        ));
    }
    Ok(())
}
