//! User Entity
//!
//! Accounts start inactive and unverified. Verifying the signup OTP
//! activates the account; an admin "delete" only clears `is_active`, so
//! the row (and its student id) survives.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    Email, OtpCode, StudentId, UserId, UserPassword, UserRole,
};
use crate::domain::value_object::otp::OTP_TTL;

/// A registered account, student or admin
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub password: UserPassword,
    pub role: UserRole,
    pub student_id: Option<StudentId>,
    pub college: Option<String>,
    pub phone_number: Option<String>,
    /// False until OTP verification, and again after a soft delete
    pub is_active: bool,
    /// Set once the signup OTP has been confirmed; never cleared
    pub is_verified: bool,
    pub otp_code: Option<OtpCode>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a fresh signup. The account is inactive until the OTP is
    /// verified; the student id is allocated separately.
    pub fn sign_up(
        username: String,
        email: Email,
        password: UserPassword,
        role: UserRole,
        college: Option<String>,
        phone_number: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            password,
            role,
            student_id: None,
            college,
            phone_number,
            is_active: false,
            is_verified: false,
            otp_code: None,
            otp_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Issue a new OTP. Code and expiry are always written together.
    pub fn issue_otp(&mut self, now: DateTime<Utc>) -> OtpCode {
        let code = OtpCode::generate();
        self.otp_code = Some(code.clone());
        self.otp_expires_at = Some(now + OTP_TTL);
        self.updated_at = now;
        code
    }

    /// Check a submitted OTP against the stored one. Expired or absent
    /// codes never match.
    pub fn otp_matches(&self, submitted: &OtpCode, now: DateTime<Utc>) -> bool {
        match (&self.otp_code, self.otp_expires_at) {
            (Some(stored), Some(expires_at)) => stored.matches(submitted) && expires_at > now,
            _ => false,
        }
    }

    /// Clear both OTP fields after a successful verification or reset
    pub fn clear_otp(&mut self, now: DateTime<Utc>) {
        self.otp_code = None;
        self.otp_expires_at = None;
        self.updated_at = now;
    }

    /// Mark the account verified and active, consuming the OTP
    pub fn activate_verified(&mut self, now: DateTime<Utc>) {
        self.is_active = true;
        self.is_verified = true;
        self.clear_otp(now);
    }

    /// Attach the allocated student id
    pub fn assign_student_id(&mut self, student_id: StudentId, now: DateTime<Utc>) {
        self.student_id = Some(student_id);
        self.updated_at = now;
    }

    /// Replace the password hash, consuming any outstanding OTP
    pub fn reset_password(&mut self, password: UserPassword, now: DateTime<Utc>) {
        self.password = password;
        self.clear_otp(now);
    }

    /// Soft delete: the account can no longer log in
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        self.updated_at = now;
    }

    pub fn can_login(&self) -> bool {
        self.is_active
    }
}
