//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use router::{academy_router, academy_router_generic};
