//! One-Time Password Value Object
//!
//! A 4-digit numeric code mailed to the user for email verification and
//! password reset. Codes expire after a fixed window and are compared in
//! constant time.

use chrono::Duration;
use kernel::error::app_error::{AppError, AppResult};
use platform::crypto::constant_time_eq;
use rand::Rng;

/// How long an issued OTP stays valid
pub const OTP_TTL: Duration = Duration::minutes(5);

/// Inclusive range of valid codes (always 4 digits, no leading zero)
const OTP_MIN: u16 = 1000;
const OTP_MAX: u16 = 9999;

/// A 4-digit one-time password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Generate a fresh random code
    pub fn generate() -> Self {
        let code = rand::rng().random_range(OTP_MIN..=OTP_MAX);
        Self(code.to_string())
    }

    /// Parse a user-submitted code
    pub fn parse(code: impl AsRef<str>) -> AppResult<Self> {
        let code = code.as_ref().trim();

        if code.len() != 4 || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::bad_request("OTP must be a 4-digit code"));
        }

        Ok(Self(code.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Compare against a submitted code in constant time
    pub fn matches(&self, submitted: &OtpCode) -> bool {
        constant_time_eq(self.0.as_bytes(), submitted.0.as_bytes())
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_four_digits() {
        for _ in 0..100 {
            let code = OtpCode::generate();
            assert_eq!(code.as_str().len(), 4);
            let n: u16 = code.as_str().parse().unwrap();
            assert!((OTP_MIN..=OTP_MAX).contains(&n));
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(OtpCode::parse("123").is_err());
        assert!(OtpCode::parse("12345").is_err());
        assert!(OtpCode::parse("12a4").is_err());
        assert!(OtpCode::parse("").is_err());
        assert!(OtpCode::parse(" 1234 ").is_ok());
    }

    #[test]
    fn test_matches() {
        let a = OtpCode::parse("4321").unwrap();
        let b = OtpCode::parse("4321").unwrap();
        let c = OtpCode::parse("1234").unwrap();
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
    }
}
