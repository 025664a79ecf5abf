//! Fault bodies returned by the VI/JSON API on non-success responses.

use serde::Deserialize;

/// A server-side fault such as `InvalidLogin` or `ManagedObjectNotFound`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VimFault {
    #[serde(rename = "_typeName")]
    pub type_name: String,
    #[serde(default)]
    pub faultstring: Option<String>,
}

impl VimFault {
    /// Parses a fault body, returning `None` for anything else.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    #[must_use]
    pub fn is_invalid_login(&self) -> bool {
        matches!(self.type_name.as_str(), "InvalidLogin" | "NotAuthenticated")
    }

    /// `faultstring` when present, else the fault type.
    #[must_use]
    pub fn message(&self) -> &str {
        self.faultstring.as_deref().unwrap_or(&self.type_name)
    }
}
