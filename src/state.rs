/*
 * Responsibility
 * - shared context attached to the Router (AppState)
 * - Clone is cheap: everything inside is Arc or Copy
 */
use std::sync::Arc;

use crate::config::AuthScheme;
use crate::services::auth::{policy::AccessPolicy, service::AuthService};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub policy: Arc<AccessPolicy>,
    pub scheme: AuthScheme,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, policy: Arc<AccessPolicy>, scheme: AuthScheme) -> Self {
        Self {
            auth,
            policy,
            scheme,
        }
    }
}
