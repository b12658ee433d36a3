use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Failures surfaced by the persistence layer.
///
/// Repositories never swallow these; they propagate to the transaction
/// boundary so a rollback happens exactly once.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// A referenced id does not exist or a stored value failed a domain
    /// constraint on the way out of the database.
    #[error("validation error: {0}")]
    Validation(String),
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Convenient alias for results returned from repository methods.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
