//! User service implementation.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use rollcall_core::{Email, ProfileId, RollcallError, RollcallResult, User, UserId, ValidateExt};
use rollcall_repository::{ProfileRepository, UserRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Logs a failure once, at the level its kind deserves, and hands it back.
fn report(operation: &str, err: RollcallError) -> RollcallError {
    if err.is_upstream_failure() {
        error!("{} failed: {}", operation, err);
    } else {
        warn!("{} rejected: {}", operation, err);
    }
    err
}

/// User service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceComponent {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    profile_repository: Arc<dyn ProfileRepository>,
}

impl UserServiceComponent {
    /// Creates a service over the given stores.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        profile_repository: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            user_repository,
            profile_repository,
        }
    }

    async fn find_existing(&self, id: UserId) -> RollcallResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RollcallError::not_found("User", id))
    }

    async fn ensure_profile_exists(&self, profile_id: ProfileId) -> RollcallResult<()> {
        match self.profile_repository.find_by_id(profile_id).await? {
            Some(_) => Ok(()),
            None => Err(RollcallError::validation(format!(
                "Profile '{profile_id}' does not exist"
            ))),
        }
    }

    async fn ensure_email_free(&self, email: &Email, owner: Option<UserId>) -> RollcallResult<()> {
        match self.user_repository.find_by_email(email.as_str()).await? {
            Some(existing) if Some(existing.id) != owner => Err(RollcallError::conflict(format!(
                "Email '{email}' already exists"
            ))),
            _ => Ok(()),
        }
    }

    async fn create(&self, request: CreateUserRequest) -> RollcallResult<UserResponse> {
        request.validate_request()?;

        let email =
            Email::new(&request.email).map_err(|e| RollcallError::Validation(e.to_string()))?;

        self.ensure_email_free(&email, None).await?;
        self.ensure_profile_exists(request.profile_id).await?;

        let user = User::builder()
            .first_name(request.first_name.trim())
            .last_name(request.last_name.trim())
            .email(email)
            .profile_id(request.profile_id)
            .build()?;

        let saved = self.user_repository.save(&user).await?;

        info!("User created with email: {}", saved.email);
        Ok(UserResponse::from(saved))
    }

    async fn update(&self, id: UserId, request: UpdateUserRequest) -> RollcallResult<UserResponse> {
        request.validate_request()?;

        let mut user = self.find_existing(id).await?;

        if let Some(first_name) = request.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = request.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(email) = request.email {
            let email =
                Email::new(email).map_err(|e| RollcallError::Validation(e.to_string()))?;
            if email != user.email {
                self.ensure_email_free(&email, Some(id)).await?;
                user.email = email;
            }
        }
        if let Some(profile_id) = request.profile_id {
            if user.profile_id != Some(profile_id) {
                self.ensure_profile_exists(profile_id).await?;
                user.profile_id = Some(profile_id);
            }
        }
        match request.is_active {
            Some(true) => user.activate(),
            Some(false) => user.deactivate(),
            None => user.touch(),
        }

        let updated = self
            .user_repository
            .update(&user)
            .await?
            .ok_or_else(|| RollcallError::not_found("User", id))?;

        info!("User updated: {}", id);
        Ok(UserResponse::from(updated))
    }

    async fn deactivate(&self, id: UserId) -> RollcallResult<UserResponse> {
        let mut user = self.find_existing(id).await?;
        user.deactivate();

        let updated = self
            .user_repository
            .update(&user)
            .await?
            .ok_or_else(|| RollcallError::not_found("User", id))?;

        info!("User deactivated: {}", id);
        Ok(UserResponse::from(updated))
    }

    async fn delete(&self, id: UserId) -> RollcallResult<()> {
        self.find_existing(id).await?;

        if !self.user_repository.delete(id).await? {
            return Err(RollcallError::not_found("User", id));
        }

        info!("User deleted: {}", id);
        Ok(())
    }
}

#[async_trait]
impl UserService for UserServiceComponent {
    async fn create_user(&self, request: CreateUserRequest) -> RollcallResult<UserResponse> {
        debug!("Creating user: {}", request.email);
        self.create(request)
            .await
            .map_err(|e| report("Create user", e))
    }

    async fn get_user(&self, id: UserId) -> RollcallResult<UserResponse> {
        debug!("Getting user: {}", id);
        self.find_existing(id)
            .await
            .map(UserResponse::from)
            .map_err(|e| report("Get user", e))
    }

    async fn list_users(&self, profile_id: Option<ProfileId>) -> RollcallResult<Vec<UserResponse>> {
        debug!("Listing users, profile filter: {:?}", profile_id);
        let users = self
            .user_repository
            .find_all(profile_id)
            .await
            .map_err(|e| report("List users", e))?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RollcallResult<UserResponse> {
        debug!("Updating user: {}", id);
        self.update(id, request)
            .await
            .map_err(|e| report("Update user", e))
    }

    async fn deactivate_user(&self, id: UserId) -> RollcallResult<UserResponse> {
        debug!("Deactivating user: {}", id);
        self.deactivate(id)
            .await
            .map_err(|e| report("Deactivate user", e))
    }

    async fn delete_user(&self, id: UserId) -> RollcallResult<()> {
        debug!("Deleting user: {}", id);
        self.delete(id)
            .await
            .map_err(|e| report("Delete user", e))
    }
}

impl std::fmt::Debug for UserServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceComponent").finish_non_exhaustive()
    }
}
