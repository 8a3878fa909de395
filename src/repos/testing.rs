//! In-memory stand-in for the Postgres repo, honoring the same
//! contract (stable order, unique email, column validation). Lets the
//! service and router suites run without a database.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::user_repo::{FieldValue, USER_COLUMNS, User, UserStore};

#[derive(Default)]
pub struct MemStore {
    users: Mutex<Vec<User>>,
}

fn field_matches(user: &User, col: &str, val: &FieldValue) -> bool {
    match col {
        "id" => matches!(val, FieldValue::Int(i) if *i == user.id),
        "email" => matches!(val, FieldValue::Text(s) if *s == user.email),
        "hashed_password" => {
            matches!(val, FieldValue::Text(s) if *s == user.hashed_password)
        }
        "session_id" => match val {
            FieldValue::Text(s) => user.session_id.as_deref() == Some(s),
            FieldValue::Null => user.session_id.is_none(),
            FieldValue::Int(_) => false,
        },
        "reset_token" => match val {
            FieldValue::Text(s) => user.reset_token.as_deref() == Some(s),
            FieldValue::Null => user.reset_token.is_none(),
            FieldValue::Int(_) => false,
        },
        _ => false,
    }
}

fn check_columns(pairs: &[(&str, FieldValue)]) -> RepoResult<()> {
    for (col, _) in pairs {
        if !USER_COLUMNS.contains(col) {
            return Err(RepoError::InvalidQuery(col.to_string()));
        }
    }
    Ok(())
}

#[async_trait]
impl UserStore for MemStore {
    async fn add_user(&self, email: &str, hashed_password: &str) -> RepoResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(RepoError::Duplicate);
        }
        let user = User {
            id: users.len() as i64 + 1,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            session_id: None,
            reset_token: None,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by(&self, filter: &[(&str, FieldValue)]) -> RepoResult<User> {
        if filter.is_empty() {
            return Err(RepoError::InvalidQuery("empty filter".to_string()));
        }
        check_columns(filter)?;
        let users = self.users.lock().unwrap();
        users
            .iter()
            .find(|u| filter.iter().all(|(c, v)| field_matches(u, c, v)))
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn update_user(&self, user_id: i64, patch: &[(&str, FieldValue)]) -> RepoResult<()> {
        check_columns(patch)?;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(RepoError::NotFound)?;
        for (col, val) in patch {
            let text = |v: &FieldValue| match v {
                FieldValue::Text(s) => Some(s.clone()),
                _ => None,
            };
            match *col {
                "email" => user.email = text(val).unwrap(),
                "hashed_password" => user.hashed_password = text(val).unwrap(),
                "session_id" => user.session_id = text(val),
                "reset_token" => user.reset_token = text(val),
                _ => {}
            }
        }
        Ok(())
    }
}
