/*
 * Responsibility
 * - sqlx operations for the `users` table
 * - column-name validation for dynamic filters/patches
 * - db errors are returned in a shape the service layer can map
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::{RepoError, RepoResult};

/// Column set of the `users` table. Filters and patches may only name
/// these columns; anything else is an `InvalidQuery`.
pub const USER_COLUMNS: &[&str] = &[
    "id",
    "email",
    "hashed_password",
    "session_id",
    "reset_token",
];

#[derive(Clone, Debug, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub hashed_password: String,
    pub session_id: Option<String>,
    pub reset_token: Option<String>,
}

/// A value bound into a filter or patch. `Null` matches/writes SQL NULL.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    Null,
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }
}

/// Persistence contract for users.
///
/// The auth service only talks to this trait. Production uses
/// `PgUserRepo`; tests run against an in-memory double.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. A duplicate email surfaces as
    /// `RepoError::Duplicate` via the table's unique constraint, so
    /// callers never need a racy check-then-create.
    async fn add_user(&self, email: &str, hashed_password: &str) -> RepoResult<User>;

    /// First user matching every (column, value) pair, in stable order.
    /// `NotFound` when nothing matches, `InvalidQuery` on an unknown
    /// column or an empty filter.
    async fn find_user_by(&self, filter: &[(&str, FieldValue)]) -> RepoResult<User>;

    /// Apply all patch fields in one statement. `NotFound` when the id
    /// does not exist. An empty patch is a no-op.
    async fn update_user(&self, user_id: i64, patch: &[(&str, FieldValue)]) -> RepoResult<()>;
}

fn check_column(name: &str) -> RepoResult<()> {
    if USER_COLUMNS.contains(&name) {
        Ok(())
    } else {
        Err(RepoError::InvalidQuery(name.to_string()))
    }
}

/// Render the WHERE clause for a filter. NULL values are rendered as
/// `IS NULL` and consume no placeholder; everything else binds in
/// filter order.
fn filter_clause(filter: &[(&str, FieldValue)]) -> RepoResult<String> {
    if filter.is_empty() {
        return Err(RepoError::InvalidQuery("empty filter".to_string()));
    }

    let mut parts = Vec::with_capacity(filter.len());
    let mut n = 0;
    for (col, val) in filter {
        check_column(col)?;
        match val {
            FieldValue::Null => parts.push(format!("{col} IS NULL")),
            _ => {
                n += 1;
                parts.push(format!("{col} = ${n}"));
            }
        }
    }

    Ok(parts.join(" AND "))
}

#[derive(Clone, Debug)]
pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotent schema setup: create-if-absent, never drop.
    pub async fn ensure_schema(&self) -> RepoResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id              BIGSERIAL PRIMARY KEY,
                email           TEXT NOT NULL UNIQUE,
                hashed_password TEXT NOT NULL,
                session_id      TEXT,
                reset_token     TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(RepoError::Db)?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserRepo {
    async fn add_user(&self, email: &str, hashed_password: &str) -> RepoResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hashed_password)
            VALUES ($1, $2)
            RETURNING id, email, hashed_password, session_id, reset_token
            "#,
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn find_user_by(&self, filter: &[(&str, FieldValue)]) -> RepoResult<User> {
        let clause = filter_clause(filter)?;
        let sql = format!(
            "SELECT id, email, hashed_password, session_id, reset_token \
             FROM users WHERE {clause} ORDER BY id LIMIT 1"
        );

        let mut q = sqlx::query_as::<_, User>(&sql);
        for (_, val) in filter {
            q = match val {
                FieldValue::Int(i) => q.bind(*i),
                FieldValue::Text(s) => q.bind(s.clone()),
                // rendered as IS NULL, nothing to bind
                FieldValue::Null => q,
            };
        }

        q.fetch_optional(&self.pool)
            .await
            .map_err(RepoError::Db)?
            .ok_or(RepoError::NotFound)
    }

    async fn update_user(&self, user_id: i64, patch: &[(&str, FieldValue)]) -> RepoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut sets = Vec::with_capacity(patch.len());
        for (i, (col, _)) in patch.iter().enumerate() {
            check_column(col)?;
            sets.push(format!("{} = ${}", col, i + 2));
        }
        // One statement, one commit: either every field lands or none do.
        let sql = format!("UPDATE users SET {} WHERE id = $1", sets.join(", "));

        let mut q = sqlx::query(&sql).bind(user_id);
        for (_, val) in patch {
            q = match val {
                FieldValue::Int(i) => q.bind(*i),
                FieldValue::Text(s) => q.bind(s.clone()),
                FieldValue::Null => q.bind(None::<String>),
            };
        }

        let res = q.execute(&self.pool).await.map_err(RepoError::Db)?;
        if res.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
