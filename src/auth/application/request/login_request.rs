use serde::Serialize;

/// Body of `SessionManager.Login`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}
