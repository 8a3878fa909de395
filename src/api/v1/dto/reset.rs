use serde::{Deserialize, Serialize};

/// Request body for `POST /reset_password`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

/// The single-use token permitting one password change.
#[derive(Debug, Clone, Serialize)]
pub struct ResetTokenResponse {
    pub email: String,
    pub reset_token: String,
}

/// Request body for `PUT /reset_password`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePasswordRequest {
    pub reset_token: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
