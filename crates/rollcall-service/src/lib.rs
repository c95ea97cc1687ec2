//! # Rollcall Service
//!
//! Business logic for users and profiles, the process-local cache, and the
//! cached request handler that HTTP controllers talk to.

pub mod cache;
pub mod cached_user_service;
pub mod dto;
pub mod r#impl;
pub mod profile_service;
pub mod user_service;

pub use cache::*;
pub use cached_user_service::*;
pub use dto::*;
pub use profile_service::*;
pub use user_service::*;
pub use r#impl::{
    CachedUserServiceComponent, CachedUserServiceComponentParameters, ProfileServiceComponent,
    UserServiceComponent,
};
