//! Postgres repository implementations.

mod profile_repository;
mod user_repository;

pub use profile_repository::*;
pub use user_repository::*;
