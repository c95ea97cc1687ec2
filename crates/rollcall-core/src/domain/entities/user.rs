//! User entity.

use super::super::value_objects::Email;
use crate::{Entity, ProfileId, RollcallError, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest first or last name the `users` table accepts.
pub const NAME_MAX_LENGTH: usize = 30;

/// A registered user, owned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// User's first name.
    pub first_name: String,

    /// User's last name.
    pub last_name: String,

    /// User's email address, unique across users.
    pub email: Email,

    /// Whether the user is active. Deactivation keeps the row.
    pub is_active: bool,

    /// Profile the user belongs to.
    pub profile_id: Option<ProfileId>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Starts building a new user.
    #[must_use]
    pub fn builder() -> UserBuilder {
        UserBuilder::new()
    }

    /// Marks the user inactive.
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    /// Marks the user active again.
    pub fn activate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    /// Bumps the update timestamp after a field change.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity<UserId> for User {
    fn id(&self) -> &UserId {
        &self.id
    }
}

/// Builder for creating User instances.
///
/// Only the email is mandatory; `is_active` starts out `true`.
#[derive(Debug)]
pub struct UserBuilder {
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<Email>,
    profile_id: Option<ProfileId>,
    is_active: bool,
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self {
            first_name: None,
            last_name: None,
            email: None,
            profile_id: None,
            is_active: true,
        }
    }
}

impl UserBuilder {
    /// Creates a new user builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the first name.
    #[must_use]
    pub fn first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    /// Sets the last name.
    #[must_use]
    pub fn last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    /// Sets the email.
    #[must_use]
    pub fn email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    /// Sets the profile.
    #[must_use]
    pub fn profile_id(mut self, profile_id: ProfileId) -> Self {
        self.profile_id = Some(profile_id);
        self
    }

    /// Overrides the active flag.
    #[must_use]
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds the User instance.
    ///
    /// # Errors
    ///
    /// Returns [`RollcallError::Validation`] when no email was set.
    pub fn build(self) -> Result<User, RollcallError> {
        let email = self
            .email
            .ok_or_else(|| RollcallError::validation("Email is required"))?;

        let now = Utc::now();
        Ok(User {
            id: UserId::new(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email,
            is_active: self.is_active,
            profile_id: self.profile_id,
            created_at: now,
            updated_at: now,
        })
    }
}
