use thiserror::Error;

/// Errors raised by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Could not obtain a pooled connection.
    #[error("connection error: {0}")]
    Connection(#[from] diesel::r2d2::PoolError),
    /// The database rejected or failed the query.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    /// A stored row violated a domain constraint.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// The row to modify does not exist.
    #[error("not found")]
    NotFound,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
