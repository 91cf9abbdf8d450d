//! Application Layer
//!
//! Use cases orchestrating the domain entities and repositories.

pub mod config;
pub mod manage_students;
pub mod password_reset;
pub mod profile;
pub mod refresh;
pub mod resend_otp;
pub mod sign_in;
pub mod sign_up;
pub mod verify_otp;

pub use config::AuthConfig;
