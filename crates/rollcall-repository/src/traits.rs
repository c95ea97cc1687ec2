//! Repository trait definitions.

use async_trait::async_trait;
use rollcall_core::{Interface, Profile, ProfileId, RollcallResult, User, UserId};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RollcallResult<Option<User>>;

    /// Lists users newest-first, optionally restricted to one profile.
    async fn find_all(&self, profile_id: Option<ProfileId>) -> RollcallResult<Vec<User>>;

    /// Finds a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> RollcallResult<Option<User>>;

    /// Saves a new user.
    async fn save(&self, user: &User) -> RollcallResult<User>;

    /// Overwrites the mutable fields of an existing user.
    ///
    /// Returns `None` when no user with that id exists.
    async fn update(&self, user: &User) -> RollcallResult<Option<User>>;

    /// Deletes a user by ID. Returns `true` if a row was removed.
    async fn delete(&self, id: UserId) -> RollcallResult<bool>;
}

/// Profile repository trait.
#[async_trait]
pub trait ProfileRepository: Interface + Send + Sync {
    /// Lists all profiles ordered by name.
    async fn find_all(&self) -> RollcallResult<Vec<Profile>>;

    /// Finds a profile by ID.
    async fn find_by_id(&self, id: ProfileId) -> RollcallResult<Option<Profile>>;
}
