//! Data Transfer Objects for the HTTP boundary.
//!
//! JSON field names are camelCase.

mod profile_dto;
mod user_dto;

pub use profile_dto::*;
pub use user_dto::*;
