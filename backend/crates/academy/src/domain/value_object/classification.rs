//! Study Material Classification

use crate::error::{AcademyError, AcademyResult};

/// What kind of study material a file is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Previous year question papers
    Pyq,
    Notes,
    OneShots,
}

impl Classification {
    pub fn as_i16(&self) -> i16 {
        match self {
            Classification::Pyq => 0,
            Classification::Notes => 1,
            Classification::OneShots => 2,
        }
    }

    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(Classification::Pyq),
            1 => Some(Classification::Notes),
            2 => Some(Classification::OneShots),
            _ => None,
        }
    }

    /// Wire name, as shown in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Pyq => "PYQ",
            Classification::Notes => "Notes",
            Classification::OneShots => "One-shots",
        }
    }

    pub fn parse(s: &str) -> AcademyResult<Self> {
        match s {
            "PYQ" => Ok(Classification::Pyq),
            "Notes" => Ok(Classification::Notes),
            "One-shots" => Ok(Classification::OneShots),
            other => Err(AcademyError::Validation(format!(
                "Unknown classification: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
