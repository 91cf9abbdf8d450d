//! Repository Traits
//!
//! Async trait definitions implemented by the Postgres store. Handlers
//! stay generic over these so the use cases can be tested against
//! in-memory fakes.

use crate::domain::entity::{Session, User};
use crate::domain::value_object::{Email, StudentId, UserId};
use crate::error::AuthResult;

/// User persistence operations
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find a user by internal id
    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check whether an email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Check whether a student id is already taken
    async fn exists_by_student_id(&self, student_id: &StudentId) -> AuthResult<bool>;

    /// Persist changes to an existing user
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// List all active students
    async fn list_students(&self) -> AuthResult<Vec<User>>;
}

/// Session register operations
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Atomically replace the user's session with this one. At most one
    /// row per user survives.
    async fn replace_for_user(&self, session: &Session) -> AuthResult<()>;

    /// Fetch the user's current session, if any
    async fn find_by_user(&self, user_id: &UserId) -> AuthResult<Option<Session>>;
}

/// Outbound port into the enrollment domain, used at signup to open a
/// pending course request.
#[trait_variant::make(EnrollmentPort: Send)]
pub trait LocalEnrollmentPort {
    /// Open a pending course request for the student. Returns false
    /// when the branch does not exist; signup proceeds regardless.
    async fn open_request(&self, student_id: &UserId, branch_id: i32) -> AuthResult<bool>;
}
