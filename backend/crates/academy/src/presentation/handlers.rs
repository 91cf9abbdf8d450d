//! HTTP Handlers

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use auth::middleware::AuthContext;

use crate::application::branches::ListBranchesUseCase;
use crate::application::materials::{
    ListMaterialsUseCase, MaterialFileUseCase, UploadMaterialInput, UploadMaterialUseCase,
};
use crate::application::requests::CourseRequestUseCase;
use crate::domain::repository::{
    BranchRepository, CourseRequestRepository, StudyMaterialRepository,
};
use crate::error::{AcademyError, AcademyResult};
use crate::infra::material_store::FsMaterialStore;
use crate::presentation::dto::{
    BranchResponse, CourseRequestResponse, MaterialResponse, ReviewRequest,
};

/// Shared state for academy handlers
#[derive(Clone)]
pub struct AcademyAppState<R>
where
    R: BranchRepository
        + CourseRequestRepository
        + StudyMaterialRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    pub repo: Arc<R>,
    pub store: Arc<FsMaterialStore>,
}

// ============================================================================
// Branches
// ============================================================================

/// GET /api/branches
pub async fn branches_list<R>(
    State(state): State<AcademyAppState<R>>,
) -> AcademyResult<Json<Vec<BranchResponse>>>
where
    R: BranchRepository
        + CourseRequestRepository
        + StudyMaterialRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = ListBranchesUseCase::new(state.repo.clone());
    let branches = use_case.execute().await?;

    Ok(Json(
        branches.iter().map(BranchResponse::from_branch).collect(),
    ))
}

// ============================================================================
// Course Requests
// ============================================================================

/// GET /api/courserequest
pub async fn my_requests<R>(
    State(state): State<AcademyAppState<R>>,
    ctx: AuthContext,
) -> AcademyResult<Json<Vec<CourseRequestResponse>>>
where
    R: BranchRepository
        + CourseRequestRepository
        + StudyMaterialRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = CourseRequestUseCase::new(state.repo.clone());
    let requests = use_case.my_requests(&ctx.user_id).await?;

    Ok(Json(
        requests
            .iter()
            .map(CourseRequestResponse::from_detail)
            .collect(),
    ))
}

/// GET /api/admin/dashboard
pub async fn admin_dashboard<R>(
    State(state): State<AcademyAppState<R>>,
    ctx: AuthContext,
) -> AcademyResult<Json<Vec<CourseRequestResponse>>>
where
    R: BranchRepository
        + CourseRequestRepository
        + StudyMaterialRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    ctx.require_admin()?;

    let use_case = CourseRequestUseCase::new(state.repo.clone());
    let requests = use_case.pending().await?;

    Ok(Json(
        requests
            .iter()
            .map(CourseRequestResponse::from_detail)
            .collect(),
    ))
}

/// PATCH /api/courserequests/{id}/update
pub async fn review_request<R>(
    State(state): State<AcademyAppState<R>>,
    ctx: AuthContext,
    Path(id): Path<i32>,
    Json(req): Json<ReviewRequest>,
) -> AcademyResult<Json<CourseRequestResponse>>
where
    R: BranchRepository
        + CourseRequestRepository
        + StudyMaterialRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    ctx.require_admin()?;

    let use_case = CourseRequestUseCase::new(state.repo.clone());
    let detail = use_case.review(id, &req.status).await?;

    Ok(Json(CourseRequestResponse::from_detail(&detail)))
}

// ============================================================================
// Study Materials
// ============================================================================

/// GET /api/materials
pub async fn materials_list<R>(
    State(state): State<AcademyAppState<R>>,
    ctx: AuthContext,
) -> AcademyResult<Json<Vec<MaterialResponse>>>
where
    R: BranchRepository
        + CourseRequestRepository
        + StudyMaterialRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = ListMaterialsUseCase::new(state.repo.clone(), state.repo.clone());
    let materials = use_case.execute(&ctx.user_id).await?;

    Ok(Json(
        materials
            .iter()
            .map(MaterialResponse::from_material)
            .collect(),
    ))
}

/// POST /api/materials/upload (multipart)
pub async fn material_upload<R>(
    State(state): State<AcademyAppState<R>>,
    ctx: AuthContext,
    multipart: Multipart,
) -> AcademyResult<impl IntoResponse>
where
    R: BranchRepository
        + CourseRequestRepository
        + StudyMaterialRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    ctx.require_admin()?;

    let input = parse_upload_form(multipart).await?;

    let use_case =
        UploadMaterialUseCase::new(state.repo.clone(), state.repo.clone(), state.store.clone());
    let material = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MaterialResponse::from_material(&material)),
    ))
}

/// GET /api/materials/{id}/file
///
/// Serves the PDF inline. Unauthenticated, so external document viewers
/// can fetch it by URL.
pub async fn material_file<R>(
    State(state): State<AcademyAppState<R>>,
    Path(id): Path<i32>,
) -> AcademyResult<impl IntoResponse>
where
    R: BranchRepository
        + CourseRequestRepository
        + StudyMaterialRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = MaterialFileUseCase::new(state.repo.clone(), state.store.clone());
    let (file_name, bytes) = use_case.execute(id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    ))
}

/// Pull the upload fields out of the multipart form
async fn parse_upload_form(mut multipart: Multipart) -> AcademyResult<UploadMaterialInput> {
    let mut title = None;
    let mut classification = None;
    let mut branch_id = None;
    let mut is_preview = false;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AcademyError::Validation(e.to_string()))?
    {
        match field.name().unwrap_or_default() {
            "title" => {
                title = Some(text_field(field).await?);
            }
            "classification" => {
                classification = Some(text_field(field).await?);
            }
            "branch" => {
                let raw = text_field(field).await?;
                branch_id = Some(raw.parse::<i32>().map_err(|_| {
                    AcademyError::Validation("Branch must be an integer id".into())
                })?);
            }
            "is_preview" => {
                let raw = text_field(field).await?;
                is_preview = matches!(raw.as_str(), "true" | "True" | "1");
            }
            "file" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| AcademyError::Validation("File must have a name".into()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AcademyError::Validation(e.to_string()))?;
                file = Some((file_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (file_name, file_bytes) =
        file.ok_or_else(|| AcademyError::Validation("Missing field: file".into()))?;

    Ok(UploadMaterialInput {
        title: title.ok_or_else(|| AcademyError::Validation("Missing field: title".into()))?,
        classification: classification
            .ok_or_else(|| AcademyError::Validation("Missing field: classification".into()))?,
        branch_id: branch_id
            .ok_or_else(|| AcademyError::Validation("Missing field: branch".into()))?,
        is_preview,
        file_name,
        file_bytes,
    })
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> AcademyResult<String> {
    field
        .text()
        .await
        .map_err(|e| AcademyError::Validation(e.to_string()))
}
