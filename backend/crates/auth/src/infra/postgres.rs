//! Postgres Auth Store
//!
//! Implements the auth repository traits on top of sqlx/Postgres.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{Session, User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    Email, OtpCode, StudentId, UserId, UserPassword, UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Postgres-backed auth store
#[derive(Clone)]
pub struct PgAuthStore {
    pool: PgPool,
}

impl PgAuthStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Row shape of the `users` table
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    role: i16,
    student_id: Option<String>,
    college: Option<String>,
    phone_number: Option<String>,
    is_active: bool,
    is_verified: bool,
    otp_code: Option<String>,
    otp_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_i16(self.role)
            .ok_or_else(|| AuthError::Internal(format!("Unknown role code {}", self.role)))?;
        let password = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            id: UserId::from_uuid(self.id),
            username: self.username,
            email: Email::from_db(self.email),
            password,
            role,
            student_id: self.student_id.map(StudentId::from_db),
            college: self.college,
            phone_number: self.phone_number,
            is_active: self.is_active,
            is_verified: self.is_verified,
            otp_code: self.otp_code.map(OtpCode::from_db),
            otp_expires_at: self.otp_expires_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, username, email, password_hash, role, student_id, college, \
     phone_number, is_active, is_verified, otp_code, otp_expires_at, created_at, updated_at";

impl UserRepository for PgAuthStore {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, email, password_hash, role, student_id, college,
                phone_number, is_active, is_verified, otp_code, otp_expires_at,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.role.as_i16())
        .bind(user.student_id.as_ref().map(|s| s.as_str()))
        .bind(&user.college)
        .bind(&user.phone_number)
        .bind(user.is_active)
        .bind(user.is_verified)
        .bind(user.otp_code.as_ref().map(|o| o.as_str()))
        .bind(user.otp_expires_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn exists_by_student_id(&self, student_id: &StudentId) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE student_id = $1)")
                .bind(student_id.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                username = $2,
                password_hash = $3,
                student_id = $4,
                college = $5,
                phone_number = $6,
                is_active = $7,
                is_verified = $8,
                otp_code = $9,
                otp_expires_at = $10,
                updated_at = $11
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(user.password.as_phc_string())
        .bind(user.student_id.as_ref().map(|s| s.as_str()))
        .bind(&user.college)
        .bind(&user.phone_number)
        .bind(user.is_active)
        .bind(user.is_verified)
        .bind(user.otp_code.as_ref().map(|o| o.as_str()))
        .bind(user.otp_expires_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_students(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE role = 0 AND is_active = TRUE ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}

/// Row shape of the `sessions` table
#[derive(sqlx::FromRow)]
struct SessionRow {
    session_key: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_key: self.session_key,
            user_id: UserId::from_uuid(self.user_id),
            created_at: self.created_at,
        }
    }
}

impl SessionRepository for PgAuthStore {
    async fn replace_for_user(&self, session: &Session) -> AuthResult<()> {
        // Single upsert keyed on the user; no window where two rows or
        // zero rows exist for a user mid-login
        sqlx::query(
            r#"
            INSERT INTO sessions (session_key, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET
                session_key = EXCLUDED.session_key,
                created_at = EXCLUDED.created_at
            "#,
        )
        .bind(&session.session_key)
        .bind(session.user_id.as_uuid())
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT session_key, user_id, created_at FROM sessions WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }
}
