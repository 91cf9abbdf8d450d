//! Academy (Enrollment) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Postgres store and on-disk material storage
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Branch catalogue
//! - Course requests: opened at signup, reviewed by admins
//! - Study materials: PDF upload and gated listing (full access when the
//!   student's request is approved, preview-only otherwise)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AcademyConfig;
pub use error::{AcademyError, AcademyResult};
pub use infra::postgres::PgAcademyStore;
pub use presentation::router::{academy_router, academy_router_generic};

#[cfg(test)]
mod tests;
