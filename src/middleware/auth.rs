//! Authentication gate for `/api/v1`.
//!
//! AccessPolicy decides whether the request needs credentials at all;
//! the configured scheme decides how credentials are extracted (Basic
//! header vs session token). On success an `AuthCtx` is inserted into
//! request extensions for handlers to read via the extractor.

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::config::AuthScheme;
use crate::error::AppError;
use crate::services::auth::credentials;
use crate::state::AppState;

/// Header carrying the opaque session token.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Apply the auth middleware to a router.
///
/// Example:
/// ```ignore
/// let v1 = api::v1::routes(state.clone());
/// let v1 = middleware::auth::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8's from_fn cannot take a State extractor, so pass state explicitly
    router.layer(middleware::from_fn_with_state(state, guard))
}

async fn guard(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // This router is nested under /api/v1 and axum strips the prefix
    // before inner layers run, while the exempt patterns are full
    // paths. Match against the original URI, not the stripped one.
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    if !state.policy.requires_auth(Some(&path)) {
        return Ok(next.run(req).await);
    }

    let user = match state.scheme {
        AuthScheme::Basic => {
            let creds = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(credentials::parse_basic_auth)
                .ok_or(AppError::Unauthorized)?;

            state.auth.authenticate(&creds.email, &creds.password).await?
        }
        AuthScheme::Session => {
            let token = req
                .headers()
                .get(SESSION_TOKEN_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(credentials::parse_session_token);

            match token {
                Some(token) => state.auth.resolve_session(token).await?,
                None => None,
            }
        }
    };

    let Some(user) = user else {
        tracing::debug!(path = %path, "rejected unauthenticated request");
        return Err(AppError::Unauthorized);
    };

    // middleware → extractor hand-off
    req.extensions_mut().insert(AuthCtx::new(user.id, user.email));

    Ok(next.run(req).await)
}
