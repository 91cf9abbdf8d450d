//! Study Material Use Cases
//!
//! Listing is gated on the student's course request: an approved
//! request opens the whole branch, anything less shows previews only,
//! and no request at all shows nothing.

use std::sync::Arc;

use auth::models::UserId;

use crate::domain::entity::{NewStudyMaterial, StudyMaterial};
use crate::domain::repository::{
    BranchRepository, CourseRequestRepository, StudyMaterialRepository,
};
use crate::domain::value_object::{Classification, RequestStatus};
use crate::error::{AcademyError, AcademyResult};
use crate::infra::material_store::FsMaterialStore;

/// Material listing use case
pub struct ListMaterialsUseCase<R, S>
where
    R: CourseRequestRepository,
    S: StudyMaterialRepository,
{
    requests: Arc<R>,
    materials: Arc<S>,
}

impl<R, S> ListMaterialsUseCase<R, S>
where
    R: CourseRequestRepository,
    S: StudyMaterialRepository,
{
    pub fn new(requests: Arc<R>, materials: Arc<S>) -> Self {
        Self {
            requests,
            materials,
        }
    }

    pub async fn execute(&self, student_id: &UserId) -> AcademyResult<Vec<StudyMaterial>> {
        let Some(request) = self.requests.find_first_by_student(student_id).await? else {
            return Ok(Vec::new());
        };

        let preview_only = request.status != RequestStatus::Approved;
        self.materials
            .list_by_branch(request.branch_id, preview_only)
            .await
    }
}

/// Upload input (already pulled out of the multipart form)
pub struct UploadMaterialInput {
    pub title: String,
    pub classification: String,
    pub branch_id: i32,
    pub is_preview: bool,
    pub file_name: String,
    pub file_bytes: Vec<u8>,
}

/// Material upload use case (admin)
pub struct UploadMaterialUseCase<B, S>
where
    B: BranchRepository,
    S: StudyMaterialRepository,
{
    branches: Arc<B>,
    materials: Arc<S>,
    store: Arc<FsMaterialStore>,
}

impl<B, S> UploadMaterialUseCase<B, S>
where
    B: BranchRepository,
    S: StudyMaterialRepository,
{
    pub fn new(branches: Arc<B>, materials: Arc<S>, store: Arc<FsMaterialStore>) -> Self {
        Self {
            branches,
            materials,
            store,
        }
    }

    pub async fn execute(&self, input: UploadMaterialInput) -> AcademyResult<StudyMaterial> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(AcademyError::Validation("Title cannot be empty".into()));
        }
        if input.file_bytes.is_empty() {
            return Err(AcademyError::Validation("File cannot be empty".into()));
        }

        let classification = Classification::parse(&input.classification)?;

        if self.branches.find_by_id(input.branch_id).await?.is_none() {
            return Err(AcademyError::BranchNotFound);
        }

        let file_path = self
            .store
            .save(&input.file_name, &input.file_bytes)
            .await?;

        let material = self
            .materials
            .create(NewStudyMaterial {
                title,
                file_path,
                classification,
                branch_id: input.branch_id,
                is_preview: input.is_preview,
            })
            .await?;

        tracing::info!(
            material_id = material.id,
            branch_id = material.branch_id,
            classification = %material.classification,
            "Study material uploaded"
        );

        Ok(material)
    }
}

/// Material file download use case
pub struct MaterialFileUseCase<S>
where
    S: StudyMaterialRepository,
{
    materials: Arc<S>,
    store: Arc<FsMaterialStore>,
}

impl<S> MaterialFileUseCase<S>
where
    S: StudyMaterialRepository,
{
    pub fn new(materials: Arc<S>, store: Arc<FsMaterialStore>) -> Self {
        Self { materials, store }
    }

    /// The stored file name and its bytes
    pub async fn execute(&self, id: i32) -> AcademyResult<(String, Vec<u8>)> {
        let material = self
            .materials
            .find_by_id(id)
            .await?
            .ok_or(AcademyError::MaterialNotFound)?;

        let bytes = self
            .store
            .read(&material.file_path)
            .await
            .map_err(|_| AcademyError::MaterialNotFound)?;

        Ok((material.file_path, bytes))
    }
}
