//! Profile DTOs.

use chrono::{DateTime, Utc};
use rollcall_core::{Profile, ProfileId};
use serde::{Deserialize, Serialize};

/// Profile response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: ProfileId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
