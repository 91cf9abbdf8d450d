//! Resend OTP Use Case
//!
//! Issues a fresh verification OTP for an unverified account.

use std::sync::Arc;

use chrono::Utc;
use platform::mailer::Mailer;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};

/// Resend OTP use case
pub struct ResendOtpUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    mailer: Arc<M>,
}

impl<U, M> ResendOtpUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    pub fn new(user_repo: Arc<U>, mailer: Arc<M>) -> Self {
        Self { user_repo, mailer }
    }

    pub async fn execute(&self, email: String) -> AuthResult<()> {
        let email = Email::new(email).map_err(|_| AuthError::UserNotFound)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_verified {
            return Err(AuthError::AlreadyVerified);
        }

        let otp = user.issue_otp(Utc::now());
        self.user_repo.update(&user).await?;

        let body = format!("Your new OTP is: {}", otp.as_str());
        if let Err(e) = self
            .mailer
            .send_mail(user.email.as_str(), "Your New OTP for Produit Academy", &body)
            .await
        {
            tracing::warn!(error = %e, email = %user.email, "Failed to send resend OTP mail");
        }

        Ok(())
    }
}
