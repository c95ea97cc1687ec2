//! Cache key generators for consistent key naming.
//!
//! Read and invalidation paths must build keys through these functions.

use rollcall_core::UserId;

const USER_PREFIX: &str = "user_";

/// Key for a single user.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("{USER_PREFIX}{id}")
}

/// Key for the unfiltered user list.
#[must_use]
pub fn users_list() -> String {
    "users_list".to_string()
}

/// Key for the profile list.
#[must_use]
pub fn profiles_list() -> String {
    "profiles_list".to_string()
}
