//! Repository Traits

use auth::models::UserId;

use crate::domain::entity::{
    Branch, CourseRequest, CourseRequestDetail, NewStudyMaterial, StudyMaterial,
};
use crate::error::AcademyResult;

/// Branch catalogue operations
#[trait_variant::make(BranchRepository: Send)]
pub trait LocalBranchRepository {
    /// All branches
    async fn list(&self) -> AcademyResult<Vec<Branch>>;

    /// Find a branch by id
    async fn find_by_id(&self, id: i32) -> AcademyResult<Option<Branch>>;
}

/// Course request operations. Requests are opened through the
/// enrollment port at signup; this trait covers everything after that.
#[trait_variant::make(CourseRequestRepository: Send)]
pub trait LocalCourseRequestRepository {
    /// Find a request by id
    async fn find_by_id(&self, id: i32) -> AcademyResult<Option<CourseRequest>>;

    /// The student's earliest request, which is the one that gates
    /// material visibility
    async fn find_first_by_student(&self, student_id: &UserId)
    -> AcademyResult<Option<CourseRequest>>;

    /// All of the student's requests, joined with student and branch
    async fn list_by_student(&self, student_id: &UserId)
    -> AcademyResult<Vec<CourseRequestDetail>>;

    /// All pending requests, joined with student and branch
    async fn list_pending(&self) -> AcademyResult<Vec<CourseRequestDetail>>;

    /// Persist a status change
    async fn update_status(&self, request: &CourseRequest) -> AcademyResult<()>;

    /// Fetch the joined view of one request
    async fn find_detail_by_id(&self, id: i32) -> AcademyResult<Option<CourseRequestDetail>>;
}

/// Study material operations
#[trait_variant::make(StudyMaterialRepository: Send)]
pub trait LocalStudyMaterialRepository {
    /// Insert a new material and return it with its id
    async fn create(&self, material: NewStudyMaterial) -> AcademyResult<StudyMaterial>;

    /// Find a material by id
    async fn find_by_id(&self, id: i32) -> AcademyResult<Option<StudyMaterial>>;

    /// Materials of a branch, optionally restricted to previews
    async fn list_by_branch(
        &self,
        branch_id: i32,
        preview_only: bool,
    ) -> AcademyResult<Vec<StudyMaterial>>;
}
