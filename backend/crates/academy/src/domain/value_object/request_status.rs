//! Course Request Status

use crate::error::{AcademyError, AcademyResult};

/// Lifecycle state of a course request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Convert to database representation
    pub fn as_i16(&self) -> i16 {
        match self {
            RequestStatus::Pending => 0,
            RequestStatus::Approved => 1,
            RequestStatus::Rejected => 2,
        }
    }

    /// Convert from database representation
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(RequestStatus::Pending),
            1 => Some(RequestStatus::Approved),
            2 => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    /// Wire name, as shown in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
        }
    }

    /// Parse a review verdict. Only Approved and Rejected are valid
    /// outcomes of a review; anything else (including Pending) is
    /// refused.
    pub fn parse_verdict(s: &str) -> AcademyResult<Self> {
        match s {
            "Approved" => Ok(RequestStatus::Approved),
            "Rejected" => Ok(RequestStatus::Rejected),
            _ => Err(AcademyError::InvalidStatus),
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
