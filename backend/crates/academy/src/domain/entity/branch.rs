//! Branch Entity

/// A course branch students can enroll in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub id: i32,
    pub name: String,
}
