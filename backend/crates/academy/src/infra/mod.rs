//! Infrastructure Layer

pub mod material_store;
pub mod postgres;

pub use material_store::FsMaterialStore;
pub use postgres::PgAcademyStore;
