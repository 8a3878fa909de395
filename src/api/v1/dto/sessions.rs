use serde::{Deserialize, Serialize};

/// Request body for `POST /sessions` (login).
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: the opaque session token the client presents in
/// the `X-Session-Token` header from here on.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub email: String,
    pub session_token: String,
}
