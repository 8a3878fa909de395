use axum::Json;
use axum::extract::State;

use crate::api::v1::dto::reset::{
    MessageResponse, ResetRequest, ResetTokenResponse, UpdatePasswordRequest,
};
use crate::error::AppError;
use crate::services::auth::service::AuthError;
use crate::state::AppState;

/// Issue (or re-issue) a password-reset token.
///
/// An unknown email is 403 here, not 404. That does leak whether the
/// address is registered; kept for compatibility with the login form's
/// companion flow.
pub async fn request_reset(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<ResetTokenResponse>, AppError> {
    let token = state
        .auth
        .request_password_reset(&req.email)
        .await
        .map_err(|e| match e {
            AuthError::NotFound => AppError::Forbidden,
            other => other.into(),
        })?;

    Ok(Json(ResetTokenResponse {
        email: req.email,
        reset_token: token,
    }))
}

/// Consume a reset token: replace the password, clear the token.
pub async fn update_password(
    State(state): State<AppState>,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if req.new_password.is_empty() {
        return Err(AppError::InvalidRequest(
            "new_password is required".to_string(),
        ));
    }

    // InvalidToken -> 403
    state
        .auth
        .reset_password(&req.reset_token, &req.new_password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}
