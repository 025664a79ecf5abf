mod api_release;
mod vsphere_password;
mod vsphere_session_id;
mod vsphere_url;
mod vsphere_username;

pub use api_release::{ApiRelease, DEFAULT_API_RELEASE};
pub use vsphere_password::VspherePassword;
pub use vsphere_session_id::{SESSION_HEADER, VsphereSessionId};
pub use vsphere_url::VsphereUrl;
pub use vsphere_username::VsphereUsername;

// Re-export validation functions for internal use
pub(crate) use api_release::validate_api_release;
pub(crate) use vsphere_password::validate_password;
pub(crate) use vsphere_session_id::validate_session_id;
pub(crate) use vsphere_url::parse_url;
pub(crate) use vsphere_username::validate_username;
