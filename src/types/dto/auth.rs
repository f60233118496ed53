use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login of the user
    pub login: String,

    /// Password of the user
    pub password: String,
}

/// Response model returned by a successful login
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "bearer")
    pub token_type: String,

    /// Role of the authenticated user
    pub role: String,

    /// Id of the authenticated user
    pub user_id: i32,
}
