use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),

    /// Unique-constraint violation (duplicate email).
    #[error("duplicate key")]
    Duplicate,

    /// No row matched the filter / id.
    #[error("no matching row")]
    NotFound,

    /// A filter or patch referenced a column that does not exist.
    /// This is a programmer error, not user input.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl RepoError {
    /// Give meaning to the errors the store can act on: a Postgres
    /// unique violation (23505) becomes `Duplicate`, everything else
    /// stays a raw db error.
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23505")
        {
            return RepoError::Duplicate;
        }
        RepoError::Db(e)
    }
}

pub type RepoResult<T> = Result<T, RepoError>;
