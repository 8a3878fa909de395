use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use crate::api::v1::dto::sessions::{LoginRequest, SessionResponse};
use crate::error::AppError;
use crate::middleware::auth::SESSION_TOKEN_HEADER;
use crate::services::auth::credentials;
use crate::state::AppState;

/// Login: validate credentials, then issue a session token.
///
/// Every failure mode is the same 401 — wrong password and unknown
/// email are deliberately indistinguishable.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    if !state.auth.login(&req.email, &req.password).await? {
        return Err(AppError::Unauthorized);
    }

    let token = state
        .auth
        .create_session(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(SessionResponse {
        email: req.email,
        session_token: token,
    }))
}

/// Logout: destroy the session behind the presented token.
///
/// This route sits on the exempt list, so it resolves the token itself
/// instead of going through the middleware.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let token = headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(credentials::parse_session_token)
        .ok_or(AppError::Forbidden)?;

    let user = state
        .auth
        .resolve_session(token)
        .await?
        .ok_or(AppError::Forbidden)?;

    state.auth.destroy_session(user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
