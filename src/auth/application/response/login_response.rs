use serde::Deserialize;

/// The `UserSession` returned by a successful login.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_name: String,
    #[serde(default)]
    pub full_name: Option<String>,
}
