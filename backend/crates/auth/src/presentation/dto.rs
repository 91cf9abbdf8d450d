//! Request/Response DTOs

use serde::{Deserialize, Serialize};

use crate::domain::entity::User;

/// Generic message response
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Sign up request
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// "student" (default) or "admin"
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Branch the student wants to enroll in
    #[serde(default)]
    pub branch: Option<i32>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the JWT pair
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
}

/// Token refresh request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Token refresh response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// OTP verification request
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// OTP resend / password reset request
#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Password reset confirmation
#[derive(Debug, Deserialize)]
pub struct PasswordResetConfirmRequest {
    pub email: String,
    pub otp: String,
    pub password: String,
}

/// Full user view (dashboard, admin listings)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub student_id: Option<String>,
    pub college: Option<String>,
    pub phone_number: Option<String>,
    pub is_active: bool,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
            student_id: user.student_id.as_ref().map(|s| s.as_str().to_string()),
            college: user.college.clone(),
            phone_number: user.phone_number.clone(),
            is_active: user.is_active,
        }
    }
}

/// Self-service profile view; email is shown but never writable
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    pub college: Option<String>,
    pub phone_number: Option<String>,
}

impl ProfileResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.as_str().to_string(),
            college: user.college.clone(),
            phone_number: user.phone_number.clone(),
        }
    }
}

/// Partial profile update
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Partial student update (admin)
#[derive(Debug, Deserialize)]
pub struct StudentUpdateRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}
