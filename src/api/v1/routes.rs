use axum::{
    Router,
    routing::{get, post},
};

use crate::api::v1::handlers::{profile, reset, sessions, status, users};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/status", get(status::status))
        .route("/users", post(users::register))
        .route("/sessions", post(sessions::login).delete(sessions::logout))
        .route("/profile", get(profile::profile))
        .route(
            "/reset_password",
            post(reset::request_reset).put(reset::update_password),
        )
        .with_state(state)
}
