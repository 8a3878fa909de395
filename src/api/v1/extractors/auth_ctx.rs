/*
 * Responsibility
 * - the authenticated-request context as handlers see it
 * - middleware validates credentials and stores this in request
 *   extensions; handlers only ever receive this type
 */
use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::state::AppState;

/// Context attached to an authenticated request.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: i64,
    pub email: String,
}

impl AuthCtx {
    pub fn new(user_id: i64, email: String) -> Self {
        Self { user_id, email }
    }
}

/// Extractor for handlers that need the authenticated user.
///
/// Assumes the auth middleware already inserted an AuthCtx into
/// request extensions; a miss means the route is not behind the
/// middleware (or the policy exempted it) and yields 401.
pub struct AuthCtxExtractor(pub AuthCtx);

impl FromRequestParts<AppState> for AuthCtxExtractor
where
    AppState: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthCtx>()
            .cloned()
            .map(AuthCtxExtractor)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
