//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `user_service.rs`).

pub mod cached_user_service_impl;
pub mod profile_service_impl;
pub mod user_service_impl;

pub use cached_user_service_impl::{CachedUserServiceComponent, CachedUserServiceComponentParameters};
pub use profile_service_impl::ProfileServiceComponent;
pub use user_service_impl::UserServiceComponent;
