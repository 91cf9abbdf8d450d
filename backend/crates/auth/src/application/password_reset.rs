//! Password Reset Use Cases
//!
//! Two steps: request an OTP by email, then confirm it together with the
//! new password. The same OTP fields back both signup verification and
//! password reset, so a reset OTP also satisfies a pending verification
//! check until it is consumed.

use std::sync::Arc;

use chrono::Utc;
use platform::mailer::Mailer;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, OtpCode, RawPassword};
use crate::error::{AuthError, AuthResult};

/// Password reset confirm input
pub struct ResetConfirmInput {
    pub email: String,
    pub otp: String,
    pub password: String,
}

/// Password reset use case (request + confirm)
pub struct PasswordResetUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    mailer: Arc<M>,
}

impl<U, M> PasswordResetUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    pub fn new(user_repo: Arc<U>, mailer: Arc<M>) -> Self {
        Self { user_repo, mailer }
    }

    /// Issue a reset OTP and mail it
    pub async fn request(&self, email: String) -> AuthResult<()> {
        let email = Email::new(email).map_err(|_| AuthError::UserNotFound)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let otp = user.issue_otp(Utc::now());
        self.user_repo.update(&user).await?;

        let body = format!("Your OTP to reset your password is: {}", otp.as_str());
        if let Err(e) = self
            .mailer
            .send_mail(
                user.email.as_str(),
                "Password Reset OTP for Produit Academy",
                &body,
            )
            .await
        {
            tracing::warn!(error = %e, email = %user.email, "Failed to send password reset mail");
        }

        Ok(())
    }

    /// Confirm the OTP and set the new password
    pub async fn confirm(&self, input: ResetConfirmInput) -> AuthResult<()> {
        let email = Email::new(input.email).map_err(|_| AuthError::UserNotFound)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let submitted = OtpCode::parse(&input.otp).map_err(|_| AuthError::OtpInvalid)?;

        let now = Utc::now();
        if !user.otp_matches(&submitted, now) {
            return Err(AuthError::OtpInvalid);
        }

        let password = RawPassword::new(input.password)?.hash()?;
        user.reset_password(password, now);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.id, "Password reset");

        Ok(())
    }
}
