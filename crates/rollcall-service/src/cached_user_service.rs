//! Request handler trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use rollcall_core::{Interface, ProfileId, RollcallResult, UserId};

/// Cache-aware entry point for user requests.
///
/// Reads may be answered from the cache. Update, deactivate and delete purge
/// the user's entry and the list entry once the store has accepted the change
/// and before they return. Create leaves the cache alone.
#[async_trait]
pub trait CachedUserService: Interface + Send + Sync {
    /// Creates a user.
    async fn create_user(&self, request: CreateUserRequest) -> RollcallResult<UserResponse>;

    /// Gets a user, consulting the cache first.
    async fn get_user(&self, id: UserId) -> RollcallResult<UserResponse>;

    /// Lists users. Only the unfiltered list is cached.
    async fn list_users(&self, profile_id: Option<ProfileId>) -> RollcallResult<Vec<UserResponse>>;

    /// Updates a user and invalidates its cache entries.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RollcallResult<UserResponse>;

    /// Deactivates a user and invalidates its cache entries.
    async fn deactivate_user(&self, id: UserId) -> RollcallResult<UserResponse>;

    /// Deletes a user and invalidates its cache entries.
    async fn delete_user(&self, id: UserId) -> RollcallResult<()>;
}
