//! Course Request Entity
//!
//! A student's wish to enroll in a branch. Opened as Pending at signup
//! and settled by an admin review.

use chrono::{DateTime, Utc};

use auth::models::UserId;

use crate::domain::entity::Branch;
use crate::domain::value_object::RequestStatus;
use crate::error::AcademyResult;

/// A course request row
#[derive(Debug, Clone)]
pub struct CourseRequest {
    pub id: i32,
    pub student_id: UserId,
    pub branch_id: i32,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl CourseRequest {
    /// Apply a review verdict. Only Approved/Rejected are accepted;
    /// a request cannot be reviewed back to Pending.
    pub fn review(&mut self, verdict: &str) -> AcademyResult<()> {
        self.status = RequestStatus::parse_verdict(verdict)?;
        Ok(())
    }
}

/// The student fields exposed alongside a course request
#[derive(Debug, Clone)]
pub struct StudentSummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub student_id: Option<String>,
}

/// A course request joined with its student and branch
#[derive(Debug, Clone)]
pub struct CourseRequestDetail {
    pub id: i32,
    pub status: RequestStatus,
    pub student: StudentSummary,
    pub branch: Branch,
}
