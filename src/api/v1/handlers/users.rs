use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::v1::dto::users::{RegisterRequest, RegisterResponse};
use crate::error::AppError;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidRequest(
            "email and password are required".to_string(),
        ));
    }

    // duplicate email -> AlreadyExists -> 409
    let user = state.auth.register(&req.email, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            email: user.email,
            message: "user created".to_string(),
        }),
    ))
}
