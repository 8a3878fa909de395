use serde::{Deserialize, Serialize};

/// Request body for `POST /users`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub email: String,
}
