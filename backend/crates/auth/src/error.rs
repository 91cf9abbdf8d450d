//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Email already registered
    #[error("A user with this email already exists")]
    EmailTaken,

    /// Invalid credentials (unknown email or wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account exists but has not been activated
    #[error("Account is inactive. Please verify your email to activate it.")]
    AccountInactive,

    /// OTP mismatch or past expiry
    #[error("Invalid or expired OTP")]
    OtpInvalid,

    /// Account is already verified (resend refused)
    #[error("Account is already verified")]
    AlreadyVerified,

    /// Bearer token missing from the request
    #[error("Authentication credentials were not provided")]
    MissingToken,

    /// Bearer token malformed, expired, or of the wrong type
    #[error("Invalid or expired token")]
    TokenInvalid,

    /// Caller lacks the required capability
    #[error("You do not have permission to perform this action")]
    Forbidden,

    /// Input validation failure
    #[error("{0}")]
    Validation(String),

    /// Student-id allocator hit its attempt bound
    #[error("Could not allocate a unique student id")]
    StudentIdExhausted,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::AccountInactive => StatusCode::FORBIDDEN,
            AuthError::OtpInvalid | AuthError::AlreadyVerified | AuthError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::MissingToken | AuthError::TokenInvalid => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::StudentIdExhausted
            | AuthError::Database(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::TokenInvalid => ErrorKind::Unauthorized,
            AuthError::AccountInactive | AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::OtpInvalid | AuthError::AlreadyVerified | AuthError::Validation(_) => {
                ErrorKind::BadRequest
            }
            AuthError::StudentIdExhausted
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::StudentIdExhausted => {
                tracing::error!("Student id allocation exhausted its attempt bound");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountInactive => {
                tracing::warn!("Login attempt on inactive account");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<platform::token::TokenError> for AuthError {
    fn from(err: platform::token::TokenError) -> Self {
        use platform::token::TokenError;
        match err {
            // Encoding failures happen at issuance and are our fault
            TokenError::Encoding(msg) => AuthError::Internal(msg),
            TokenError::Invalid | TokenError::WrongType { .. } => AuthError::TokenInvalid,
        }
    }
}
