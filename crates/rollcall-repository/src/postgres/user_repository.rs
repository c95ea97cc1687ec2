//! Postgres user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rollcall_core::{Email, ProfileId, RollcallResult, User, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, is_active, profile_id, created_at, updated_at";

/// Postgres user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct PostgresUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PostgresUserRepository {
    /// Creates a new Postgres user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    is_active: bool,
    profile_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: Email::new_unchecked(row.email),
            is_active: row.is_active,
            profile_id: Some(ProfileId::from_uuid(row.profile_id)),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: UserId) -> RollcallResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_all(&self, profile_id: Option<ProfileId>) -> RollcallResult<Vec<User>> {
        debug!("Finding users, profile filter: {:?}", profile_id);

        let rows = match profile_id {
            Some(profile_id) => {
                sqlx::query_as::<_, UserRow>(&format!(
                    "SELECT {USER_COLUMNS} FROM users WHERE profile_id = $1 ORDER BY created_at DESC"
                ))
                .bind(profile_id.into_inner())
                .fetch_all(self.pool.inner())
                .await?
            }
            None => {
                sqlx::query_as::<_, UserRow>(&format!(
                    "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
                ))
                .fetch_all(self.pool.inner())
                .await?
            }
        };

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> RollcallResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn save(&self, user: &User) -> RollcallResult<User> {
        debug!("Saving user: {}", user.email);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r"
            INSERT INTO users (id, first_name, last_name, email, is_active, profile_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(user.id.into_inner())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.email.as_str())
        .bind(user.is_active)
        .bind(user.profile_id.map(ProfileId::into_inner))
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(User::from(row))
    }

    async fn update(&self, user: &User) -> RollcallResult<Option<User>> {
        debug!("Updating user: {}", user.id);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, is_active = $5,
                profile_id = COALESCE($6, profile_id), updated_at = $7
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "
        ))
        .bind(user.id.into_inner())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.email.as_str())
        .bind(user.is_active)
        .bind(user.profile_id.map(ProfileId::into_inner))
        .bind(user.updated_at)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn delete(&self, id: UserId) -> RollcallResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
