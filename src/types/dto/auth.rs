use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object};
use serde::{Deserialize, Serialize};

use crate::types::internal::Principal;

/// Request model for user login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    #[oai(default)]
    pub username: String,

    /// Password for authentication
    #[oai(default)]
    pub password: String,
}

/// Response model for a successful login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque session token, also set as the `nodue_session` cookie
    pub session_token: String,

    /// Unix timestamp when the session expires
    pub expires_at: i64,

    /// Authenticated username
    pub username: String,

    /// Role of the authenticated user
    pub role: String,

    /// Where the client should go next
    pub redirect_to: String,
}

/// Response model for logout
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Success message
    pub message: String,

    /// Where the client should go next
    pub redirect_to: String,
}

/// Identity block shown on dashboards
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct PrincipalResponse {
    pub user_id: String,
    pub username: String,
    pub role: String,
    pub college_name: Option<String>,
    pub branch_name: Option<String>,
}

impl From<&Principal> for PrincipalResponse {
    fn from(principal: &Principal) -> Self {
        Self {
            user_id: principal.user_id.clone(),
            username: principal.username.clone(),
            role: principal.role.to_string(),
            college_name: principal.college_name.clone(),
            branch_name: principal.branch_name.clone(),
        }
    }
}

/// API response for login endpoint
#[derive(ApiResponse)]
pub enum LoginApiResponse {
    /// Authentication successful, session cookie set
    #[oai(status = 200)]
    Ok(
        Json<LoginResponse>,
        #[oai(header = "Set-Cookie")] String,
    ),
}

/// API response for logout endpoint
#[derive(ApiResponse)]
pub enum LogoutApiResponse {
    /// Session ended, session cookie cleared
    #[oai(status = 200)]
    Ok(
        Json<LogoutResponse>,
        #[oai(header = "Set-Cookie")] String,
    ),
}
