//! User Password Value Objects
//!
//! Thin wrappers around the platform password primitives so the rest of
//! the auth domain never touches Argon2 details directly.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword};

/// A plaintext password fresh from user input, validated against policy
#[derive(Debug)]
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate and wrap a plaintext password
    pub fn new(password: impl Into<String>) -> AppResult<Self> {
        let cleartext = ClearTextPassword::new(password.into())
            .map_err(|e| AppError::bad_request(e.to_string()))?;
        Ok(Self(cleartext))
    }

    /// Hash the password into its storable form
    pub fn hash(&self) -> AppResult<UserPassword> {
        let hashed = self
            .0
            .hash()
            .map_err(|e| AppError::internal(e.to_string()))?;
        Ok(UserPassword(hashed))
    }
}

/// A stored Argon2id password hash
#[derive(Debug, Clone)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Create from a PHC string loaded from the database
    pub fn from_phc_string(phc: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc)
            .map_err(|e| AppError::internal(e.to_string()))?;
        Ok(Self(hashed))
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a submitted password against this hash
    pub fn verify(&self, submitted: &RawPassword) -> bool {
        self.0.verify(&submitted.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_enforced() {
        assert!(RawPassword::new("short").is_err());
        assert!(RawPassword::new("   ").is_err());
        assert!(RawPassword::new("correct horse battery").is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("correct horse battery").unwrap();
        let stored = raw.hash().unwrap();

        assert!(stored.verify(&raw));

        let other = RawPassword::new("wrong horse battery").unwrap();
        assert!(!stored.verify(&other));
    }

    #[test]
    fn test_phc_round_trip() {
        let raw = RawPassword::new("correct horse battery").unwrap();
        let stored = raw.hash().unwrap();

        let reloaded = UserPassword::from_phc_string(stored.as_phc_string()).unwrap();
        assert!(reloaded.verify(&raw));
    }
}
