use super::DomainError;
use thiserror::Error;

/// Application-level errors (includes infrastructure)
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Request timeout")]
    Timeout,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Domain(e) => match e {
                DomainError::InvalidInput(_) => 400,
                DomainError::SlotUnavailable => 409,
                DomainError::LockUnavailable => 503,
            },
            AppError::Database(_) | AppError::Internal(_) => 500,
            AppError::NotFound(_) => 404,
            AppError::Validation(_) => 422,
            AppError::Timeout => 504,
        }
    }

    /// Get a machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Domain(e) => match e {
                DomainError::InvalidInput(_) => "INVALID_INPUT",
                DomainError::SlotUnavailable => "SLOT_UNAVAILABLE",
                DomainError::LockUnavailable => "LOCK_UNAVAILABLE",
            },
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Timeout => "TIMEOUT",
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(err.to_string())
    }
}

/// Result type alias for application operations
#[allow(dead_code)]
pub type AppResult<T> = Result<T, AppError>;
