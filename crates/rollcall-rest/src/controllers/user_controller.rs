//! User management controller.

use crate::{
    extractors::ValidatedJson,
    responses::{created, no_content, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Router,
};
use rollcall_core::{ProfileId, RollcallError, UserId};
use rollcall_service::{CreateUserRequest, UpdateUserRequest, UserResponse};
use serde::Deserialize;
use tracing::debug;

/// Query string accepted by the user list.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    /// Restricts the list to one profile.
    pub profile: Option<String>,
}

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/inactivate", put(deactivate_user))
}

/// List users, newest first.
async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> ApiResult<Vec<UserResponse>> {
    debug!("List users request, profile: {:?}", query.profile);

    let profile_id = query
        .profile
        .as_deref()
        .map(parse_profile_id)
        .transpose()?;

    let users = state.users.list_users(profile_id).await?;
    ok(users)
}

/// Create a new user.
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<StatusCode, AppError> {
    debug!("Create user request: {}", request.email);

    state.users.create_user(request).await?;
    Ok(created())
}

/// Get a user by ID.
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    debug!("Get user request: {}", id);

    let user_id = parse_user_id(&id)?;
    let user = state.users.get_user(user_id).await?;
    ok(user)
}

/// Update a user. `isActive: true` reactivates.
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<StatusCode, AppError> {
    debug!("Update user request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.users.update_user(user_id, request).await?;
    Ok(no_content())
}

/// Deactivate a user.
async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Deactivate user request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.users.deactivate_user(user_id).await?;
    Ok(no_content())
}

/// Delete a user.
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete user request: {}", id);

    let user_id = parse_user_id(&id)?;
    state.users.delete_user(user_id).await?;
    Ok(no_content())
}

fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id)
        .map_err(|_| AppError(RollcallError::Validation(format!("Invalid user ID: {id}"))))
}

fn parse_profile_id(id: &str) -> Result<ProfileId, AppError> {
    ProfileId::parse(id)
        .map_err(|_| AppError(RollcallError::Validation(format!("Invalid profile ID: {id}"))))
}
