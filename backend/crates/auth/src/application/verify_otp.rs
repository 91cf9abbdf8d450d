//! Verify OTP Use Case
//!
//! Confirms the signup OTP and activates the account.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, OtpCode};
use crate::error::{AuthError, AuthResult};

/// Verify OTP input
pub struct VerifyOtpInput {
    pub email: String,
    pub otp: String,
}

/// Verify OTP use case
pub struct VerifyOtpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> VerifyOtpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> AuthResult<()> {
        let email = Email::new(input.email).map_err(|_| AuthError::UserNotFound)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let submitted = OtpCode::parse(&input.otp).map_err(|_| AuthError::OtpInvalid)?;

        let now = Utc::now();
        if !user.otp_matches(&submitted, now) {
            // Stored OTP fields stay untouched on a failed attempt
            return Err(AuthError::OtpInvalid);
        }

        user.activate_verified(now);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.id, "Account verified");

        Ok(())
    }
}
