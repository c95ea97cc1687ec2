//! Profile entity.

use crate::{Entity, ProfileId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profiles created on first start.
pub const DEFAULT_PROFILE_NAMES: [&str; 2] = ["Administrator", "User"];

/// A named group of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a new profile with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ProfileId::new(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity<ProfileId> for Profile {
    fn id(&self) -> &ProfileId {
        &self.id
    }
}
