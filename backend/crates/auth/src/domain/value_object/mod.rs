//! Value Objects

pub mod email;
pub mod otp;
pub mod student_id;
pub mod user_id;
pub mod user_password;
pub mod user_role;

pub use email::Email;
pub use otp::OtpCode;
pub use student_id::StudentId;
pub use user_id::UserId;
pub use user_password::{RawPassword, UserPassword};
pub use user_role::UserRole;
