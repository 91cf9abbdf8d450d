//! Study Material Entity

use crate::domain::value_object::Classification;

/// An uploaded study material (a PDF on disk plus its metadata)
#[derive(Debug, Clone)]
pub struct StudyMaterial {
    pub id: i32,
    pub title: String,
    /// Path relative to the materials root
    pub file_path: String,
    pub classification: Classification,
    pub branch_id: i32,
    /// Preview materials are visible before the course request is
    /// approved
    pub is_preview: bool,
}

/// A material about to be persisted (no id yet)
#[derive(Debug, Clone)]
pub struct NewStudyMaterial {
    pub title: String,
    pub file_path: String,
    pub classification: Classification,
    pub branch_id: i32,
    pub is_preview: bool,
}
