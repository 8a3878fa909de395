/*
 * Responsibility
 * - registration, login, session lifecycle, password reset
 * - orchestrates UserStore + password hashing; owns token generation
 * - login/session failures stay indistinguishable from "no such user"
 */
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error};

use crate::repos::error::RepoError;
use crate::repos::user_repo::{FieldValue, User, UserStore};
use crate::services::auth::password::{self, PasswordError};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already registered")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("invalid reset token")]
    InvalidToken,

    #[error("password hashing failed")]
    Hash,

    #[error("store error")]
    Store(#[from] RepoError),
}

impl From<PasswordError> for AuthError {
    fn from(_: PasswordError) -> Self {
        AuthError::Hash
    }
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// Duplicate detection rides on the store's unique constraint (one
    /// atomic insert), so two concurrent registrations with the same
    /// email cannot both succeed.
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let hashed = password::hash_password(password)?;

        match self.store.add_user(email, &hashed).await {
            Ok(user) => Ok(user),
            Err(RepoError::Duplicate) => Err(AuthError::AlreadyExists),
            Err(e) => Err(e.into()),
        }
    }

    /// Validate credentials without issuing a session.
    ///
    /// Fails closed: empty input, unknown email and wrong password all
    /// yield `Ok(None)` — the caller cannot tell them apart.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Ok(None);
        }

        let user = match self
            .store
            .find_user_by(&[("email", FieldValue::text(email))])
            .await
        {
            Ok(user) => user,
            Err(RepoError::NotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if password::verify_password(&user.hashed_password, password) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<bool, AuthError> {
        Ok(self.authenticate(email, password).await?.is_some())
    }

    /// Issue a fresh session token for a known email.
    ///
    /// Overwrites any prior session_id: a user has at most one live
    /// session, and the old token stops resolving immediately.
    pub async fn create_session(&self, email: &str) -> Result<Option<String>, AuthError> {
        let user = match self
            .store
            .find_user_by(&[("email", FieldValue::text(email))])
            .await
        {
            Ok(user) => user,
            Err(RepoError::NotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let token = generate_token();
        self.store
            .update_user(user.id, &[("session_id", FieldValue::text(token.as_str()))])
            .await?;

        Ok(Some(token))
    }

    /// Resolve a session token back to its user. Empty token or no
    /// match is `None`.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<User>, AuthError> {
        if token.is_empty() {
            return Ok(None);
        }

        match self
            .store
            .find_user_by(&[("session_id", FieldValue::text(token))])
            .await
        {
            Ok(user) => Ok(Some(user)),
            Err(RepoError::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Clear the user's session. Idempotent: a user with no live
    /// session is a no-op, not an error.
    pub async fn destroy_session(&self, user_id: i64) -> Result<(), AuthError> {
        self.store
            .update_user(user_id, &[("session_id", FieldValue::Null)])
            .await
            .map_err(|e| match e {
                RepoError::NotFound => AuthError::NotFound,
                other => other.into(),
            })
    }

    /// Issue (or re-issue) a password-reset token.
    ///
    /// A token already in flight is returned unchanged so a re-request
    /// does not invalidate the one the user may be about to use.
    pub async fn request_password_reset(&self, email: &str) -> Result<String, AuthError> {
        let user = match self
            .store
            .find_user_by(&[("email", FieldValue::text(email))])
            .await
        {
            Ok(user) => user,
            Err(RepoError::NotFound) => return Err(AuthError::NotFound),
            Err(e) => return Err(e.into()),
        };

        if let Some(token) = user.reset_token {
            debug!(user_id = user.id, "re-using pending reset token");
            return Ok(token);
        }

        let token = generate_token();
        self.store
            .update_user(user.id, &[("reset_token", FieldValue::text(token.as_str()))])
            .await?;

        Ok(token)
    }

    /// Consume a reset token and replace the password.
    ///
    /// The new hash and the cleared token land in the same update, so
    /// the token is single-use.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let user = match self
            .store
            .find_user_by(&[("reset_token", FieldValue::text(token))])
            .await
        {
            Ok(user) => user,
            Err(RepoError::NotFound) => return Err(AuthError::InvalidToken),
            Err(e) => return Err(e.into()),
        };

        let hashed = password::hash_password(new_password)?;
        self.store
            .update_user(
                user.id,
                &[
                    ("hashed_password", FieldValue::text(hashed)),
                    ("reset_token", FieldValue::Null),
                ],
            )
            .await
            .map_err(|e| {
                error!(user_id = user.id, error = %e, "failed to persist new password");
                AuthError::from(e)
            })
    }
}

/// 32 bytes of entropy -> URL-safe base64 without padding.
fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    getrandom::fill(&mut bytes).expect("getrandom failed");

    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::testing::MemStore;

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemStore::default()))
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let auth = service();
        auth.register("a@x.com", "pw").await.unwrap();

        let err = auth.register("a@x.com", "pw2").await.unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists));
    }

    #[tokio::test]
    async fn register_stores_a_digest_not_the_password() {
        let auth = service();
        let user = auth.register("a@x.com", "pw").await.unwrap();
        assert_ne!(user.hashed_password, "pw");
        assert!(user.session_id.is_none());
        assert!(user.reset_token.is_none());
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let auth = service();
        auth.register("a@x.com", "pw").await.unwrap();

        assert!(!auth.login("a@x.com", "wrong").await.unwrap());
        assert!(!auth.login("nouser@x.com", "pw").await.unwrap());
        assert!(!auth.login("", "pw").await.unwrap());
        assert!(!auth.login("a@x.com", "").await.unwrap());
        assert!(auth.login("a@x.com", "pw").await.unwrap());
    }

    #[tokio::test]
    async fn session_round_trip() {
        let auth = service();
        let user = auth.register("a@x.com", "pw").await.unwrap();

        let token = auth.create_session("a@x.com").await.unwrap().unwrap();
        let resolved = auth.resolve_session(&token).await.unwrap().unwrap();
        assert_eq!(resolved.id, user.id);

        auth.destroy_session(user.id).await.unwrap();
        assert!(auth.resolve_session(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_session_overwrites_prior_token() {
        let auth = service();
        auth.register("a@x.com", "pw").await.unwrap();

        let first = auth.create_session("a@x.com").await.unwrap().unwrap();
        let second = auth.create_session("a@x.com").await.unwrap().unwrap();
        assert_ne!(first, second);

        assert!(auth.resolve_session(&first).await.unwrap().is_none());
        assert!(auth.resolve_session(&second).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn create_session_for_unknown_email_is_none() {
        let auth = service();
        assert!(auth.create_session("nouser@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn resolve_empty_token_is_none() {
        let auth = service();
        assert!(auth.resolve_session("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn destroy_session_is_idempotent() {
        let auth = service();
        let user = auth.register("a@x.com", "pw").await.unwrap();

        // no live session yet: still a no-op, not an error
        auth.destroy_session(user.id).await.unwrap();
        auth.destroy_session(user.id).await.unwrap();
    }

    #[tokio::test]
    async fn destroy_session_for_unknown_user_is_not_found() {
        let auth = service();
        let err = auth.destroy_session(42).await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound));
    }

    #[tokio::test]
    async fn reset_request_is_idempotent_until_consumed() {
        let auth = service();
        auth.register("a@x.com", "pw").await.unwrap();

        let first = auth.request_password_reset("a@x.com").await.unwrap();
        let second = auth.request_password_reset("a@x.com").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn reset_request_for_unknown_email_is_not_found() {
        let auth = service();
        let err = auth.request_password_reset("nouser@x.com").await.unwrap_err();
        assert!(matches!(err, AuthError::NotFound));
    }

    #[tokio::test]
    async fn reset_token_is_single_use() {
        let auth = service();
        auth.register("a@x.com", "pw").await.unwrap();

        let token = auth.request_password_reset("a@x.com").await.unwrap();
        auth.reset_password(&token, "new").await.unwrap();

        assert!(auth.login("a@x.com", "new").await.unwrap());
        assert!(!auth.login("a@x.com", "pw").await.unwrap());

        let err = auth.reset_password(&token, "new2").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn reset_with_bogus_token_is_invalid() {
        let auth = service();
        let err = auth.reset_password("bogus", "new").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));

        let err = auth.reset_password("", "new").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn tokens_are_long_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        // 32 bytes -> 43 chars of unpadded base64
        assert_eq!(a.len(), 43);
    }
}
