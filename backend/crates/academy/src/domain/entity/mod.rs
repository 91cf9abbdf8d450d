//! Domain Entities

pub mod branch;
pub mod course_request;
pub mod study_material;

pub use branch::Branch;
pub use course_request::{CourseRequest, CourseRequestDetail, StudentSummary};
pub use study_material::{NewStudyMaterial, StudyMaterial};
