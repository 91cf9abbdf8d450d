//! Postgres Academy Store
//!
//! Implements the academy repository traits, plus the enrollment port
//! the auth signup flow calls into.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use auth::models::UserId;

use crate::domain::entity::{
    Branch, CourseRequest, CourseRequestDetail, NewStudyMaterial, StudentSummary, StudyMaterial,
};
use crate::domain::repository::{
    BranchRepository, CourseRequestRepository, StudyMaterialRepository,
};
use crate::domain::value_object::{Classification, RequestStatus};
use crate::error::{AcademyError, AcademyResult};

/// Postgres-backed academy store
#[derive(Clone)]
pub struct PgAcademyStore {
    pool: PgPool,
}

impl PgAcademyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BranchRow {
    id: i32,
    name: String,
}

impl BranchRow {
    fn into_branch(self) -> Branch {
        Branch {
            id: self.id,
            name: self.name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CourseRequestRow {
    id: i32,
    student_id: Uuid,
    branch_id: i32,
    status: i16,
    created_at: DateTime<Utc>,
}

impl CourseRequestRow {
    fn into_request(self) -> AcademyResult<CourseRequest> {
        let status = RequestStatus::from_i16(self.status).ok_or_else(|| {
            AcademyError::Internal(format!("Unknown request status code {}", self.status))
        })?;

        Ok(CourseRequest {
            id: self.id,
            student_id: UserId::from_uuid(self.student_id),
            branch_id: self.branch_id,
            status,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CourseRequestDetailRow {
    id: i32,
    status: i16,
    student_uuid: Uuid,
    username: String,
    email: String,
    student_id: Option<String>,
    branch_id: i32,
    branch_name: String,
}

impl CourseRequestDetailRow {
    fn into_detail(self) -> AcademyResult<CourseRequestDetail> {
        let status = RequestStatus::from_i16(self.status).ok_or_else(|| {
            AcademyError::Internal(format!("Unknown request status code {}", self.status))
        })?;

        Ok(CourseRequestDetail {
            id: self.id,
            status,
            student: StudentSummary {
                id: UserId::from_uuid(self.student_uuid),
                username: self.username,
                email: self.email,
                student_id: self.student_id,
            },
            branch: Branch {
                id: self.branch_id,
                name: self.branch_name,
            },
        })
    }
}

const DETAIL_QUERY: &str = r#"
    SELECT cr.id, cr.status,
           u.id AS student_uuid, u.username, u.email, u.student_id,
           b.id AS branch_id, b.name AS branch_name
    FROM course_requests cr
    JOIN users u ON u.id = cr.student_id
    JOIN branches b ON b.id = cr.branch_id
"#;

#[derive(sqlx::FromRow)]
struct StudyMaterialRow {
    id: i32,
    title: String,
    file_path: String,
    classification: i16,
    branch_id: i32,
    is_preview: bool,
}

impl StudyMaterialRow {
    fn into_material(self) -> AcademyResult<StudyMaterial> {
        let classification = Classification::from_i16(self.classification).ok_or_else(|| {
            AcademyError::Internal(format!(
                "Unknown classification code {}",
                self.classification
            ))
        })?;

        Ok(StudyMaterial {
            id: self.id,
            title: self.title,
            file_path: self.file_path,
            classification,
            branch_id: self.branch_id,
            is_preview: self.is_preview,
        })
    }
}

impl BranchRepository for PgAcademyStore {
    async fn list(&self) -> AcademyResult<Vec<Branch>> {
        let rows = sqlx::query_as::<_, BranchRow>("SELECT id, name FROM branches ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(BranchRow::into_branch).collect())
    }

    async fn find_by_id(&self, id: i32) -> AcademyResult<Option<Branch>> {
        let row = sqlx::query_as::<_, BranchRow>("SELECT id, name FROM branches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(BranchRow::into_branch))
    }
}

impl CourseRequestRepository for PgAcademyStore {
    async fn find_by_id(&self, id: i32) -> AcademyResult<Option<CourseRequest>> {
        let row = sqlx::query_as::<_, CourseRequestRow>(
            "SELECT id, student_id, branch_id, status, created_at \
             FROM course_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CourseRequestRow::into_request).transpose()
    }

    async fn find_first_by_student(
        &self,
        student_id: &UserId,
    ) -> AcademyResult<Option<CourseRequest>> {
        let row = sqlx::query_as::<_, CourseRequestRow>(
            "SELECT id, student_id, branch_id, status, created_at \
             FROM course_requests WHERE student_id = $1 ORDER BY id LIMIT 1",
        )
        .bind(student_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CourseRequestRow::into_request).transpose()
    }

    async fn list_by_student(
        &self,
        student_id: &UserId,
    ) -> AcademyResult<Vec<CourseRequestDetail>> {
        let rows = sqlx::query_as::<_, CourseRequestDetailRow>(&format!(
            "{DETAIL_QUERY} WHERE cr.student_id = $1 ORDER BY cr.id"
        ))
        .bind(student_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(CourseRequestDetailRow::into_detail)
            .collect()
    }

    async fn list_pending(&self) -> AcademyResult<Vec<CourseRequestDetail>> {
        let rows = sqlx::query_as::<_, CourseRequestDetailRow>(&format!(
            "{DETAIL_QUERY} WHERE cr.status = $1 ORDER BY cr.id"
        ))
        .bind(RequestStatus::Pending.as_i16())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(CourseRequestDetailRow::into_detail)
            .collect()
    }

    async fn update_status(&self, request: &CourseRequest) -> AcademyResult<()> {
        sqlx::query("UPDATE course_requests SET status = $2 WHERE id = $1")
            .bind(request.id)
            .bind(request.status.as_i16())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_detail_by_id(&self, id: i32) -> AcademyResult<Option<CourseRequestDetail>> {
        let row = sqlx::query_as::<_, CourseRequestDetailRow>(&format!(
            "{DETAIL_QUERY} WHERE cr.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CourseRequestDetailRow::into_detail).transpose()
    }
}

impl StudyMaterialRepository for PgAcademyStore {
    async fn create(&self, material: NewStudyMaterial) -> AcademyResult<StudyMaterial> {
        let row = sqlx::query_as::<_, StudyMaterialRow>(
            r#"
            INSERT INTO study_materials (title, file_path, classification, branch_id, is_preview)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, file_path, classification, branch_id, is_preview
            "#,
        )
        .bind(&material.title)
        .bind(&material.file_path)
        .bind(material.classification.as_i16())
        .bind(material.branch_id)
        .bind(material.is_preview)
        .fetch_one(&self.pool)
        .await?;

        row.into_material()
    }

    async fn find_by_id(&self, id: i32) -> AcademyResult<Option<StudyMaterial>> {
        let row = sqlx::query_as::<_, StudyMaterialRow>(
            "SELECT id, title, file_path, classification, branch_id, is_preview \
             FROM study_materials WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(StudyMaterialRow::into_material).transpose()
    }

    async fn list_by_branch(
        &self,
        branch_id: i32,
        preview_only: bool,
    ) -> AcademyResult<Vec<StudyMaterial>> {
        let rows = sqlx::query_as::<_, StudyMaterialRow>(
            "SELECT id, title, file_path, classification, branch_id, is_preview \
             FROM study_materials \
             WHERE branch_id = $1 AND ($2 = FALSE OR is_preview = TRUE) \
             ORDER BY id",
        )
        .bind(branch_id)
        .bind(preview_only)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(StudyMaterialRow::into_material)
            .collect()
    }
}

impl auth::domain::EnrollmentPort for PgAcademyStore {
    /// Open a pending course request at signup. A missing branch is
    /// reported back as `false`, not an error.
    async fn open_request(
        &self,
        student_id: &UserId,
        branch_id: i32,
    ) -> auth::AuthResult<bool> {
        let branch_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM branches WHERE id = $1)")
                .bind(branch_id)
                .fetch_one(&self.pool)
                .await?;

        if !branch_exists {
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO course_requests (student_id, branch_id, status, created_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(student_id.as_uuid())
        .bind(branch_id)
        .bind(RequestStatus::Pending.as_i16())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(true)
    }
}
