use actix_web::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(#[from] diesel::r2d2::PoolError),
}

impl RepositoryError {
    /// HTTP status the API layer uses when surfacing this error.
    /// Database and pool failures stay generic 500s; their detail is only
    /// ever logged server-side.
    pub fn status(&self) -> StatusCode {
        match self {
            RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
            RepositoryError::Conflict(_) => StatusCode::CONFLICT,
            RepositoryError::ValidationError(_) => StatusCode::BAD_REQUEST,
            RepositoryError::DatabaseError(_) | RepositoryError::ConnectionPoolError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to return to clients.
    pub fn public_message(&self) -> String {
        match self {
            RepositoryError::DatabaseError(_) | RepositoryError::ConnectionPoolError(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}
