//! Sign Up Use Case
//!
//! Registers a new account: the user starts inactive, gets a unique
//! student id and a verification OTP, and (when a branch was chosen)
//! a pending course request is opened in the enrollment domain.

use std::sync::Arc;

use chrono::Utc;
use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::domain::entity::User;
use crate::domain::repository::{EnrollmentPort, UserRepository};
use crate::domain::value_object::{Email, RawPassword, StudentId, UserRole};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Account role; absent means a student signup
    pub role: Option<String>,
    pub college: Option<String>,
    pub phone_number: Option<String>,
    /// Branch the student wants to enroll in
    pub branch: Option<i32>,
}

/// Sign up use case
pub struct SignUpUseCase<U, E, M>
where
    U: UserRepository,
    E: EnrollmentPort,
    M: Mailer,
{
    user_repo: Arc<U>,
    enrollment: Arc<E>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, E, M> SignUpUseCase<U, E, M>
where
    U: UserRepository,
    E: EnrollmentPort,
    M: Mailer,
{
    pub fn new(
        user_repo: Arc<U>,
        enrollment: Arc<E>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            enrollment,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<()> {
        let email = Email::new(input.email)?;

        let username = input.username.trim().to_string();
        if username.is_empty() {
            return Err(AuthError::Validation("Username cannot be empty".into()));
        }

        let role = match input.role.as_deref() {
            None => UserRole::Student,
            Some(r) => UserRole::parse(r)
                .ok_or_else(|| AuthError::Validation(format!("Unknown role: {r}")))?,
        };

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = RawPassword::new(input.password)?.hash()?;

        let mut user = User::sign_up(
            username,
            email,
            password,
            role,
            input.college,
            input.phone_number,
        );

        let now = Utc::now();
        let student_id = self.allocate_student_id().await?;
        user.assign_student_id(student_id, now);

        let otp = user.issue_otp(now);

        self.user_repo.create(&user).await?;

        // Missing branch is not an error; signup still succeeds
        if let Some(branch_id) = input.branch {
            let opened = self.enrollment.open_request(&user.id, branch_id).await?;
            if !opened {
                tracing::warn!(
                    user_id = %user.id,
                    branch_id,
                    "Signup referenced a branch that does not exist, no course request opened"
                );
            }
        }

        let body = format!(
            "Hi {},\n\nYour One-Time Password (OTP) is: {}\nIt will expire in 5 minutes.",
            user.username,
            otp.as_str()
        );
        if let Err(e) = self
            .mailer
            .send_mail(user.email.as_str(), "Your OTP for Produit Academy", &body)
            .await
        {
            // Mail is best-effort, the user can always request a resend
            tracing::warn!(error = %e, email = %user.email, "Failed to send signup OTP mail");
        }

        tracing::info!(user_id = %user.id, email = %user.email, "User signed up");

        Ok(())
    }

    /// Draw random candidates until one is free, up to the configured
    /// attempt bound.
    async fn allocate_student_id(&self) -> AuthResult<StudentId> {
        for _ in 0..self.config.student_id_max_attempts {
            let candidate = StudentId::generate();
            if !self.user_repo.exists_by_student_id(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(AuthError::StudentIdExhausted)
    }
}
