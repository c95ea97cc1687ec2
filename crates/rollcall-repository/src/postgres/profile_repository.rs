//! Postgres profile repository implementation.

use crate::{traits::ProfileRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rollcall_core::{Profile, ProfileId, RollcallResult};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Postgres profile repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ProfileRepository)]
pub struct PostgresProfileRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PostgresProfileRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: ProfileId::from_uuid(row.id),
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_all(&self) -> RollcallResult<Vec<Profile>> {
        debug!("Finding all profiles");

        let rows = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, name, created_at, updated_at FROM profiles ORDER BY name",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Profile::from).collect())
    }

    async fn find_by_id(&self, id: ProfileId) -> RollcallResult<Option<Profile>> {
        debug!("Finding profile by id: {}", id);

        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, name, created_at, updated_at FROM profiles WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Profile::from))
    }
}
