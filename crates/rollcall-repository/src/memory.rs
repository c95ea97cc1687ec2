//! In-memory repositories for tests.
//!
//! Both stores count every call and can be switched into a failing mode so
//! callers can assert how often the store was reached and how they react when
//! it is down.

use crate::traits::{ProfileRepository, UserRepository};
use async_trait::async_trait;
use parking_lot::RwLock;
use rollcall_core::{Profile, ProfileId, RollcallError, RollcallResult, User, UserId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Snapshot of how many times each user store operation ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserRepositoryCalls {
    pub find_by_id: usize,
    pub find_all: usize,
    pub find_by_email: usize,
    pub save: usize,
    pub update: usize,
    pub delete: usize,
}

#[derive(Default)]
struct Counters {
    find_by_id: AtomicUsize,
    find_all: AtomicUsize,
    find_by_email: AtomicUsize,
    save: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

fn unavailable() -> RollcallError {
    RollcallError::Database("store unavailable".to_string())
}

/// In-memory user store. Rows are kept in insertion order.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
    counters: Counters,
    failing: AtomicBool,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with the given users.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::default();
        repo.users.write().extend(users);
        repo
    }

    /// Makes every subsequent call fail with a database error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns the call counts so far.
    #[must_use]
    pub fn calls(&self) -> UserRepositoryCalls {
        let c = &self.counters;
        UserRepositoryCalls {
            find_by_id: c.find_by_id.load(Ordering::SeqCst),
            find_all: c.find_all.load(Ordering::SeqCst),
            find_by_email: c.find_by_email.load(Ordering::SeqCst),
            save: c.save.load(Ordering::SeqCst),
            update: c.update.load(Ordering::SeqCst),
            delete: c.delete.load(Ordering::SeqCst),
        }
    }

    /// Reads a row directly, bypassing the counters.
    #[must_use]
    pub fn peek(&self, id: UserId) -> Option<User> {
        self.users.read().iter().find(|u| u.id == id).cloned()
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    fn check(&self) -> RollcallResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RollcallResult<Option<User>> {
        bump(&self.counters.find_by_id);
        self.check()?;
        Ok(self.peek(id))
    }

    async fn find_all(&self, profile_id: Option<ProfileId>) -> RollcallResult<Vec<User>> {
        bump(&self.counters.find_all);
        self.check()?;

        let mut users: Vec<User> = self
            .users
            .read()
            .iter()
            .rev()
            .filter(|u| profile_id.is_none() || u.profile_id == profile_id)
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn find_by_email(&self, email: &str) -> RollcallResult<Option<User>> {
        bump(&self.counters.find_by_email);
        self.check()?;
        Ok(self
            .users
            .read()
            .iter()
            .find(|u| u.email.as_str().eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn save(&self, user: &User) -> RollcallResult<User> {
        bump(&self.counters.save);
        self.check()?;

        let mut users = self.users.write();
        if users
            .iter()
            .any(|u| u.email.as_str().eq_ignore_ascii_case(user.email.as_str()))
        {
            return Err(RollcallError::conflict(format!(
                "Email {} already exists",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> RollcallResult<Option<User>> {
        bump(&self.counters.update);
        self.check()?;

        let mut users = self.users.write();
        Ok(users.iter_mut().find(|u| u.id == user.id).map(|stored| {
            stored.first_name.clone_from(&user.first_name);
            stored.last_name.clone_from(&user.last_name);
            stored.email = user.email.clone();
            stored.is_active = user.is_active;
            if user.profile_id.is_some() {
                stored.profile_id = user.profile_id;
            }
            stored.updated_at = user.updated_at;
            stored.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> RollcallResult<bool> {
        bump(&self.counters.delete);
        self.check()?;

        let mut users = self.users.write();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

/// In-memory profile store.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<Vec<Profile>>,
    find_all_calls: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryProfileRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given profiles.
    #[must_use]
    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let repo = Self::default();
        repo.profiles.write().extend(profiles);
        repo
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// How many times the profile list was read.
    #[must_use]
    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_all(&self) -> RollcallResult<Vec<Profile>> {
        bump(&self.find_all_calls);
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        let mut profiles = self.profiles.read().clone();
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(profiles)
    }

    async fn find_by_id(&self, id: ProfileId) -> RollcallResult<Option<Profile>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.profiles.read().iter().find(|p| p.id == id).cloned())
    }
}
