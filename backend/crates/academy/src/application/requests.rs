//! Course Request Use Cases
//!
//! Students see their own requests; admins see pending ones and settle
//! them with a verdict.

use std::sync::Arc;

use auth::models::UserId;

use crate::domain::entity::CourseRequestDetail;
use crate::domain::repository::CourseRequestRepository;
use crate::error::{AcademyError, AcademyResult};

/// Course request use cases
pub struct CourseRequestUseCase<R>
where
    R: CourseRequestRepository,
{
    requests: Arc<R>,
}

impl<R> CourseRequestUseCase<R>
where
    R: CourseRequestRepository,
{
    pub fn new(requests: Arc<R>) -> Self {
        Self { requests }
    }

    /// The caller's own requests
    pub async fn my_requests(&self, student_id: &UserId) -> AcademyResult<Vec<CourseRequestDetail>> {
        self.requests.list_by_student(student_id).await
    }

    /// Pending requests awaiting review (admin dashboard)
    pub async fn pending(&self) -> AcademyResult<Vec<CourseRequestDetail>> {
        self.requests.list_pending().await
    }

    /// Settle a request with an Approved/Rejected verdict
    pub async fn review(&self, id: i32, verdict: &str) -> AcademyResult<CourseRequestDetail> {
        let mut request = self
            .requests
            .find_by_id(id)
            .await?
            .ok_or(AcademyError::RequestNotFound)?;

        request.review(verdict)?;
        self.requests.update_status(&request).await?;

        tracing::info!(
            request_id = request.id,
            status = %request.status,
            "Course request reviewed"
        );

        self.requests
            .find_detail_by_id(id)
            .await?
            .ok_or(AcademyError::RequestNotFound)
    }
}
