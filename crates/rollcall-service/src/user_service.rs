//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use rollcall_core::{Interface, ProfileId, RollcallResult, UserId};

/// Domain operations on users. Talks to the store only, never to the cache.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, request: CreateUserRequest) -> RollcallResult<UserResponse>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> RollcallResult<UserResponse>;

    /// Lists users newest-first, optionally restricted to one profile.
    async fn list_users(&self, profile_id: Option<ProfileId>) -> RollcallResult<Vec<UserResponse>>;

    /// Updates a user's fields.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RollcallResult<UserResponse>;

    /// Marks a user inactive.
    async fn deactivate_user(&self, id: UserId) -> RollcallResult<UserResponse>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> RollcallResult<()>;
}
