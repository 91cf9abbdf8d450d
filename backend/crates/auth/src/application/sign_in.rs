//! Sign In Use Case
//!
//! Authenticates a user, issues the JWT pair, and replaces the user's
//! session row so the new login is the only live one.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{Email, RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub access: String,
    pub refresh: String,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password.verify(&password) {
            return Err(AuthError::InvalidCredentials);
        }

        // Credentials are fine but the OTP was never confirmed (or the
        // account was soft deleted); tell the user explicitly.
        if !user.can_login() {
            return Err(AuthError::AccountInactive);
        }

        let issuer = self.config.token_issuer();
        let user_id = user.id.to_string();
        let access = issuer.issue_access(&user_id, &user.username, user.role.as_str())?;
        let refresh = issuer.issue_refresh(&user_id, &user.username, user.role.as_str())?;

        // One row per user; a second login replaces the first
        let session = Session::new(access.clone(), user.id);
        self.session_repo.replace_for_user(&session).await?;

        tracing::info!(user_id = %user.id, "User signed in, session replaced");

        Ok(SignInOutput { access, refresh })
    }
}
