//! Student ID Value Object
//!
//! Public-facing identifier of the form `PROD-NNNN`, assigned when an
//! account is activated. Uniqueness is enforced by the database; the
//! allocator retries on collision.

use kernel::error::app_error::{AppError, AppResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

const STUDENT_ID_PREFIX: &str = "PROD-";
const SUFFIX_MIN: u16 = 1000;
const SUFFIX_MAX: u16 = 9999;

/// Public student identifier (`PROD-NNNN`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(String);

impl StudentId {
    /// Generate a random candidate id
    pub fn generate() -> Self {
        let suffix = rand::rng().random_range(SUFFIX_MIN..=SUFFIX_MAX);
        Self(format!("{STUDENT_ID_PREFIX}{suffix}"))
    }

    /// Parse an id string, validating the format
    pub fn parse(id: impl AsRef<str>) -> AppResult<Self> {
        let id = id.as_ref().trim();

        let valid = id
            .strip_prefix(STUDENT_ID_PREFIX)
            .is_some_and(|suffix| {
                suffix.len() == 4
                    && suffix.chars().all(|c| c.is_ascii_digit())
                    && !suffix.starts_with('0')
            });

        if !valid {
            return Err(AppError::bad_request("Invalid student id format"));
        }

        Ok(Self(id.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_format() {
        for _ in 0..100 {
            let id = StudentId::generate();
            assert!(StudentId::parse(id.as_str()).is_ok());
        }
    }

    #[test]
    fn test_parse_valid() {
        assert!(StudentId::parse("PROD-1000").is_ok());
        assert!(StudentId::parse("PROD-9999").is_ok());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(StudentId::parse("PROD-0999").is_err());
        assert!(StudentId::parse("PROD-123").is_err());
        assert!(StudentId::parse("PROD-12345").is_err());
        assert!(StudentId::parse("prod-1234").is_err());
        assert!(StudentId::parse("1234").is_err());
        assert!(StudentId::parse("").is_err());
    }
}
