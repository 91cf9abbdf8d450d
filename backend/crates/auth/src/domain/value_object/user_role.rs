//! User Role Value Object

use serde::{Deserialize, Serialize};

/// Role of a user within the enrollment system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular student account
    Student,
    /// Administrator with review and management capabilities
    Admin,
}

impl UserRole {
    /// Convert to database representation
    pub fn as_i16(&self) -> i16 {
        match self {
            UserRole::Student => 0,
            UserRole::Admin => 1,
        }
    }

    /// Convert from database representation
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(UserRole::Student),
            1 => Some(UserRole::Admin),
            _ => None,
        }
    }

    /// Whether this role carries admin capabilities
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Stable string name, used inside JWT claims
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Admin => "admin",
        }
    }

    /// Parse the string form used inside JWT claims
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "student" => Some(UserRole::Student),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
