//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, constant-time comparison)
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - JWT access/refresh token issuance and validation
//! - Best-effort mail dispatch

pub mod crypto;
pub mod mailer;
pub mod password;
pub mod token;
