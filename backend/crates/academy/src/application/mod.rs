//! Application Layer

pub mod branches;
pub mod config;
pub mod materials;
pub mod requests;

pub use config::AcademyConfig;
