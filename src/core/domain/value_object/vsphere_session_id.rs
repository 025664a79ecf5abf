use crate::core::domain::error::ValidationError;

/// Header carrying the VI/JSON session token.
pub const SESSION_HEADER: &str = "vmware-api-session-id";

/// An opaque session token returned by `SessionManager.Login`.
#[derive(Clone, PartialEq)]
pub struct VsphereSessionId(String);

impl VsphereSessionId {
    /// Creates a new session id without validation.
    pub(crate) fn new_unchecked(id: String) -> Self {
        Self(id)
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for VsphereSessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VsphereSessionId(***)")
    }
}

/// Validates a session token as received in the response header.
pub(crate) fn validate_session_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::Field {
            field: "session_id".to_string(),
            message: "Session id cannot be empty".to_string(),
        });
    }
    if !id.chars().all(|c| c.is_ascii_graphic()) {
        return Err(ValidationError::Format(
            "Session id must be printable ASCII without spaces".to_string(),
        ));
    }
    Ok(())
}
