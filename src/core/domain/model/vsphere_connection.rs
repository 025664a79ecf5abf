use crate::core::domain::value_object::{
    ApiRelease, VspherePassword, VsphereUrl, VsphereUsername,
};

/// Validated connection settings for one vCenter.
#[derive(Debug, Clone)]
pub struct VsphereConnection {
    url: VsphereUrl,
    username: VsphereUsername,
    password: VspherePassword,
    api_release: ApiRelease,
    insecure: bool,
}

impl VsphereConnection {
    pub fn new(
        url: VsphereUrl,
        username: VsphereUsername,
        password: VspherePassword,
        api_release: ApiRelease,
        insecure: bool,
    ) -> Self {
        Self {
            url,
            username,
            password,
            api_release,
            insecure,
        }
    }

    pub fn url(&self) -> &VsphereUrl {
        &self.url
    }

    pub fn username(&self) -> &VsphereUsername {
        &self.username
    }

    pub fn password(&self) -> &VspherePassword {
        &self.password
    }

    pub fn api_release(&self) -> &ApiRelease {
        &self.api_release
    }

    /// Whether certificate validation is skipped.
    pub fn accept_invalid_certs(&self) -> bool {
        self.insecure
    }

    /// Full URL of a VI/JSON resource, e.g. `Folder/group-d1/childEntity`.
    pub fn api_url(&self, path: &str) -> String {
        self.url.join(&format!(
            "sdk/vim25/{}/{}",
            self.api_release.as_str(),
            path.trim_start_matches('/')
        ))
    }
}
