//! Academy Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Academy-specific result type alias
pub type AcademyResult<T> = Result<T, AcademyError>;

/// Academy-specific error variants
#[derive(Debug, Error)]
pub enum AcademyError {
    /// Course request not found
    #[error("Course request not found")]
    RequestNotFound,

    /// Study material not found (row or file)
    #[error("Material not found.")]
    MaterialNotFound,

    /// Branch not found
    #[error("Branch not found")]
    BranchNotFound,

    /// Review asked for a status other than Approved/Rejected
    #[error("Invalid status")]
    InvalidStatus,

    /// Input validation failure
    #[error("{0}")]
    Validation(String),

    /// Caller lacks the required capability
    #[error("You do not have permission to perform this action")]
    Forbidden,

    /// Material file storage failure
    #[error("Material storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AcademyError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AcademyError::RequestNotFound
            | AcademyError::MaterialNotFound
            | AcademyError::BranchNotFound => StatusCode::NOT_FOUND,
            AcademyError::InvalidStatus | AcademyError::Validation(_) => StatusCode::BAD_REQUEST,
            AcademyError::Forbidden => StatusCode::FORBIDDEN,
            AcademyError::Storage(_) | AcademyError::Database(_) | AcademyError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AcademyError::RequestNotFound
            | AcademyError::MaterialNotFound
            | AcademyError::BranchNotFound => ErrorKind::NotFound,
            AcademyError::InvalidStatus | AcademyError::Validation(_) => ErrorKind::BadRequest,
            AcademyError::Forbidden => ErrorKind::Forbidden,
            AcademyError::Storage(_) | AcademyError::Database(_) | AcademyError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AcademyError::Database(e) => {
                tracing::error!(error = %e, "Academy database error");
            }
            AcademyError::Storage(e) => {
                tracing::error!(error = %e, "Material storage error");
            }
            AcademyError::Internal(msg) => {
                tracing::error!(message = %msg, "Academy internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Academy error");
            }
        }
    }
}

impl IntoResponse for AcademyError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AcademyError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AcademyError::Validation(err.message().to_string()),
            _ => AcademyError::Internal(err.to_string()),
        }
    }
}

impl From<auth::AuthError> for AcademyError {
    fn from(err: auth::AuthError) -> Self {
        match err {
            auth::AuthError::Forbidden => AcademyError::Forbidden,
            other => AcademyError::Internal(other.to_string()),
        }
    }
}
