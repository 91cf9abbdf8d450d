//! Profile Use Cases
//!
//! Self-service view and edit of the caller's own account. Email is the
//! login identifier and stays read-only here.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Writable profile fields
#[derive(Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub college: Option<String>,
    pub phone_number: Option<String>,
}

/// Profile use case
pub struct ProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn get(&self, id: &UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn update(&self, id: &UserId, update: ProfileUpdate) -> AuthResult<User> {
        let mut user = self.get(id).await?;

        if let Some(username) = update.username {
            let username = username.trim().to_string();
            if username.is_empty() {
                return Err(AuthError::Validation("Username cannot be empty".into()));
            }
            user.username = username;
        }
        if let Some(college) = update.college {
            user.college = Some(college);
        }
        if let Some(phone_number) = update.phone_number {
            user.phone_number = Some(phone_number);
        }
        user.updated_at = Utc::now();

        self.user_repo.update(&user).await?;
        Ok(user)
    }
}
