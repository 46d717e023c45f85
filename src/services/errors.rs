use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No signed-in user, or the session has expired.
    #[error("unauthorized")]
    Unauthorized,
    /// The signed-in user lacks the admin flag.
    #[error("forbidden")]
    Forbidden,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Submitted data failed form validation.
    #[error("{0}")]
    Form(String),
    /// Submitted data violated a domain constraint.
    #[error("{0}")]
    TypeConstraint(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
