//! Student Management Use Cases (admin)
//!
//! List, inspect, edit, and soft-delete student accounts. Delete only
//! clears the active flag; the row and its student id are kept.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult};

/// Fields an admin may edit on a student account
#[derive(Default)]
pub struct StudentUpdate {
    pub username: Option<String>,
    pub college: Option<String>,
    pub phone_number: Option<String>,
}

/// Student management use case
pub struct ManageStudentsUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ManageStudentsUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// All active students
    pub async fn list(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list_students().await
    }

    pub async fn get(&self, id: &UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn update(&self, id: &UserId, update: StudentUpdate) -> AuthResult<User> {
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

    /// Soft delete: the account drops out of listings and can no longer
    /// log in.
    pub async fn delete(&self, id: &UserId) -> AuthResult<()> {
        let mut user = self.get(id).await?;
        user.deactivate(Utc::now());
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.id, "Student soft deleted");

        Ok(())
    }
}
