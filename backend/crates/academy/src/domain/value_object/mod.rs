//! Value Objects

pub mod classification;
pub mod request_status;

pub use classification::Classification;
pub use request_status::RequestStatus;
