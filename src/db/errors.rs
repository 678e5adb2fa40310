use diesel::result::{DatabaseErrorKind, Error};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    DatabaseError(diesel::result::Error),
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(#[from] diesel::r2d2::PoolError),
    #[error("Migration error: {0}")]
    MigrationError(String),
}

impl RepositoryError {
    /// Uniform mapping from diesel errors: row-not-found and unique-key
    /// violations become client-facing variants, everything else stays a
    /// server-side database error.
    pub fn from_diesel(context: &str, e: Error) -> Self {
        match e {
            Error::NotFound => Self::NotFound(context.to_string()),
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Self::Conflict(format!("{}: duplicate key", context))
            }
            other => Self::DatabaseError(other),
        }
    }
}

impl From<Error> for RepositoryError {
    fn from(e: Error) -> Self {
        Self::from_diesel("repository", e)
    }
}
