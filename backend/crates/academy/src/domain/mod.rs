//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{
    Branch, CourseRequest, CourseRequestDetail, NewStudyMaterial, StudentSummary, StudyMaterial,
};
pub use repository::{BranchRepository, CourseRequestRepository, StudyMaterialRepository};
pub use value_object::{Classification, RequestStatus};
