//! Request/Response DTOs

use serde::{Deserialize, Serialize};

use crate::domain::entity::{Branch, CourseRequestDetail, StudentSummary, StudyMaterial};

/// Branch view
#[derive(Debug, Serialize)]
pub struct BranchResponse {
    pub id: i32,
    pub name: String,
}

impl BranchResponse {
    pub fn from_branch(branch: &Branch) -> Self {
        Self {
            id: branch.id,
            name: branch.name.clone(),
        }
    }
}

/// Student fields nested inside a course request
#[derive(Debug, Serialize)]
pub struct StudentSummaryResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub student_id: Option<String>,
}

impl StudentSummaryResponse {
    fn from_summary(student: &StudentSummary) -> Self {
        Self {
            id: student.id.to_string(),
            username: student.username.clone(),
            email: student.email.clone(),
            student_id: student.student_id.clone(),
        }
    }
}

/// Course request with its student and branch expanded
#[derive(Debug, Serialize)]
pub struct CourseRequestResponse {
    pub id: i32,
    pub status: String,
    pub student: StudentSummaryResponse,
    pub branch: BranchResponse,
}

impl CourseRequestResponse {
    pub fn from_detail(detail: &CourseRequestDetail) -> Self {
        Self {
            id: detail.id,
            status: detail.status.as_str().to_string(),
            student: StudentSummaryResponse::from_summary(&detail.student),
            branch: BranchResponse::from_branch(&detail.branch),
        }
    }
}

/// Review verdict body
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub status: String,
}

/// Study material view; `file_url` points at the inline PDF endpoint
#[derive(Debug, Serialize)]
pub struct MaterialResponse {
    pub id: i32,
    pub title: String,
    pub classification: String,
    pub branch: i32,
    pub is_preview: bool,
    pub file_url: String,
}

impl MaterialResponse {
    pub fn from_material(material: &StudyMaterial) -> Self {
        Self {
            id: material.id,
            title: material.title.clone(),
            classification: material.classification.as_str().to_string(),
            branch: material.branch_id,
            is_preview: material.is_preview,
            file_url: format!("/api/materials/{}/file", material.id),
        }
    }
}
