//! Cache-aware request handler.

use crate::cache::{cache_failure, cache_keys, CacheExt, CacheInterface};
use crate::cached_user_service::CachedUserService;
use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use rollcall_core::{ProfileId, RollcallResult, UserId};
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// Request handler component for Shaku DI.
///
/// Sits between the controllers and [`UserService`], deciding per operation
/// whether the cache is consulted and which keys are purged afterwards.
#[derive(Component)]
#[shaku(interface = CachedUserService)]
pub struct CachedUserServiceComponent {
    #[shaku(inject)]
    user_service: Arc<dyn UserService>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    /// Write a single user back into the cache after a miss.
    pub populate_user_on_miss: bool,
}

impl CachedUserServiceComponent {
    #[must_use]
    pub fn new(
        user_service: Arc<dyn UserService>,
        cache: Arc<dyn CacheInterface>,
        populate_user_on_miss: bool,
    ) -> Self {
        Self {
            user_service,
            cache,
            populate_user_on_miss,
        }
    }

    /// Purges the user's entry and the list entry.
    ///
    /// Both deletes are attempted even when the first one fails; the first
    /// error is returned.
    async fn invalidate(&self, id: UserId) -> RollcallResult<()> {
        let user_key = cache_keys::user_by_id(id);
        let list_key = cache_keys::users_list();

        let user_result = self
            .cache
            .delete(&user_key)
            .await
            .map_err(|e| cache_failure(&user_key, e));
        let list_result = self
            .cache
            .delete(&list_key)
            .await
            .map_err(|e| cache_failure(&list_key, e));
        user_result?;
        list_result?;

        debug!("Invalidated cache for user: {}", id);
        Ok(())
    }
}

#[async_trait]
impl CachedUserService for CachedUserServiceComponent {
    async fn create_user(&self, request: CreateUserRequest) -> RollcallResult<UserResponse> {
        self.user_service.create_user(request).await
    }

    async fn get_user(&self, id: UserId) -> RollcallResult<UserResponse> {
        let key = cache_keys::user_by_id(id);

        if let Some(cached) = self
            .cache
            .get::<UserResponse>(&key)
            .await
            .map_err(|e| cache_failure(&key, e))?
        {
            debug!("Cache hit for user: {}", id);
            return Ok(cached);
        }
        debug!("Cache miss for user: {}", id);

        let user = self.user_service.get_user(id).await?;

        if self.populate_user_on_miss {
            self.cache
                .set(&key, &user)
                .await
                .map_err(|e| cache_failure(&key, e))?;
        }

        Ok(user)
    }

    async fn list_users(&self, profile_id: Option<ProfileId>) -> RollcallResult<Vec<UserResponse>> {
        if profile_id.is_some() {
            return self.user_service.list_users(profile_id).await;
        }

        let key = cache_keys::users_list();

        if let Some(cached) = self
            .cache
            .get::<Vec<UserResponse>>(&key)
            .await
            .map_err(|e| cache_failure(&key, e))?
        {
            debug!("Cache hit for user list");
            return Ok(cached);
        }
        debug!("Cache miss for user list");

        let users = self.user_service.list_users(None).await?;
        self.cache
            .set(&key, &users)
            .await
            .map_err(|e| cache_failure(&key, e))?;

        Ok(users)
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RollcallResult<UserResponse> {
        let updated = self.user_service.update_user(id, request).await?;
        self.invalidate(id).await?;
        Ok(updated)
    }

    async fn deactivate_user(&self, id: UserId) -> RollcallResult<UserResponse> {
        let updated = self.user_service.deactivate_user(id).await?;
        self.invalidate(id).await?;
        Ok(updated)
    }

    async fn delete_user(&self, id: UserId) -> RollcallResult<()> {
        self.user_service.delete_user(id).await?;
        self.invalidate(id).await
    }
}

impl std::fmt::Debug for CachedUserServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedUserServiceComponent")
            .field("populate_user_on_miss", &self.populate_user_on_miss)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCacheService;
    use crate::r#impl::UserServiceComponent;
    use mockall::mock;
    use parking_lot::Mutex;
    use rollcall_core::{Email, Profile, RollcallError, User};
    use rollcall_repository::memory::{InMemoryProfileRepository, InMemoryUserRepository};
    use std::time::Duration;

    mock! {
        pub Cache {}

        #[async_trait]
        impl CacheInterface for Cache {
            async fn get_raw(&self, key: &str) -> RollcallResult<Option<String>>;
            async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> RollcallResult<()>;
            async fn delete(&self, key: &str) -> RollcallResult<bool>;
        }
    }

    struct Harness {
        store: Arc<InMemoryUserRepository>,
        cache: Arc<InMemoryCacheService>,
        profile: Profile,
        ids: Vec<UserId>,
        handler: CachedUserServiceComponent,
    }

    impl Harness {
        fn new(populate_user_on_miss: bool, emails: &[&str]) -> Self {
            let profile = Profile::new("User");
            let users: Vec<User> = emails
                .iter()
                .map(|email| {
                    User::builder()
                        .first_name("Cached")
                        .last_name("User")
                        .email(Email::new_unchecked(*email))
                        .profile_id(profile.id)
                        .build()
                        .unwrap()
                })
                .collect();
            let ids = users.iter().map(|u| u.id).collect();

            let store = Arc::new(InMemoryUserRepository::with_users(users));
            let profiles = Arc::new(InMemoryProfileRepository::with_profiles([profile.clone()]));
            let cache = Arc::new(InMemoryCacheService::new());
            let service = Arc::new(UserServiceComponent::new(store.clone(), profiles));

            Self {
                handler: CachedUserServiceComponent::new(
                    service,
                    cache.clone(),
                    populate_user_on_miss,
                ),
                store,
                cache,
                profile,
                ids,
            }
        }

        /// Fills both the user entry and the list entry.
        async fn warm(&self, id: UserId) {
            let user = self.handler.user_service.get_user(id).await.unwrap();
            self.cache
                .set(&cache_keys::user_by_id(id), &user)
                .await
                .unwrap();
            self.handler.list_users(None).await.unwrap();
        }

        async fn cached(&self, key: &str) -> Option<String> {
            self.cache.get_raw(key).await.unwrap()
        }
    }

    #[tokio::test]
    async fn test_get_user_hit_skips_store() {
        let h = Harness::new(false, &["hit@user.com"]);
        let id = h.ids[0];
        h.warm(id).await;
        let before = h.store.calls().find_by_id;

        let user = h.handler.get_user(id).await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(h.store.calls().find_by_id, before);
    }

    #[tokio::test]
    async fn test_get_user_miss_does_not_populate_by_default() {
        let h = Harness::new(false, &["miss@user.com"]);
        let id = h.ids[0];

        h.handler.get_user(id).await.unwrap();
        h.handler.get_user(id).await.unwrap();

        assert!(h.cached(&cache_keys::user_by_id(id)).await.is_none());
        assert_eq!(h.store.calls().find_by_id, 2);
    }

    #[tokio::test]
    async fn test_get_user_miss_populates_when_enabled() {
        let h = Harness::new(true, &["fill@user.com"]);
        let id = h.ids[0];

        h.handler.get_user(id).await.unwrap();
        h.handler.get_user(id).await.unwrap();

        assert!(h.cached(&cache_keys::user_by_id(id)).await.is_some());
        assert_eq!(h.store.calls().find_by_id, 1);
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let h = Harness::new(true, &[]);
        let id = UserId::new();

        let result = h.handler.get_user(id).await;
        assert!(matches!(result, Err(RollcallError::NotFound { .. })));
        assert!(h.cached(&cache_keys::user_by_id(id)).await.is_none());
    }

    #[tokio::test]
    async fn test_get_user_store_failure_propagates() {
        let h = Harness::new(false, &["down@user.com"]);
        h.store.set_failing(true);

        let result = h.handler.get_user(h.ids[0]).await;
        assert!(matches!(result, Err(RollcallError::Database(_))));
    }

    #[tokio::test]
    async fn test_list_users_second_read_served_from_cache() {
        let h = Harness::new(false, &["a@user.com", "b@user.com"]);

        let first = h.handler.list_users(None).await.unwrap();
        let second = h.handler.list_users(None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(h.store.calls().find_all, 1);
        assert!(h.cached(&cache_keys::users_list()).await.is_some());
    }

    #[tokio::test]
    async fn test_filtered_list_bypasses_cache() {
        let h = Harness::new(false, &["a@user.com"]);
        h.handler.list_users(None).await.unwrap();
        h.cache
            .set(&cache_keys::users_list(), &Vec::<UserResponse>::new())
            .await
            .unwrap();

        let filtered = h.handler.list_users(Some(h.profile.id)).await.unwrap();
        assert_eq!(filtered.len(), 1);

        let cached: Vec<UserResponse> = h.cache.get(&cache_keys::users_list()).await.unwrap().unwrap();
        assert!(cached.is_empty());
        assert_eq!(h.store.calls().find_all, 2);
    }

    #[tokio::test]
    async fn test_filtered_list_for_empty_profile() {
        let h = Harness::new(false, &["a@user.com"]);
        let users = h.handler.list_users(Some(ProfileId::new())).await.unwrap();
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn test_create_leaves_cache_untouched() {
        let h = Harness::new(false, &["old@user.com"]);
        h.warm(h.ids[0]).await;
        let list_before = h.cached(&cache_keys::users_list()).await;

        let request = CreateUserRequest {
            first_name: "New".to_string(),
            last_name: "User".to_string(),
            email: "new@user.com".to_string(),
            profile_id: h.profile.id,
        };
        let created = h.handler.create_user(request).await.unwrap();

        assert_eq!(h.cached(&cache_keys::users_list()).await, list_before);
        assert!(h.cached(&cache_keys::user_by_id(created.id)).await.is_none());
        assert_eq!(h.cache.len(), 2);
    }

    #[tokio::test]
    async fn test_create_duplicate_email_never_saves() {
        let h = Harness::new(false, &["dup@user.com"]);
        let request = CreateUserRequest {
            first_name: "Dup".to_string(),
            last_name: "User".to_string(),
            email: "dup@user.com".to_string(),
            profile_id: h.profile.id,
        };

        let result = h.handler.create_user(request).await;
        assert!(matches!(result, Err(RollcallError::Conflict(_))));
        assert_eq!(h.store.calls().save, 0);
    }

    #[tokio::test]
    async fn test_update_invalidates_both_keys() {
        let h = Harness::new(false, &["u@user.com", "other@user.com"]);
        let (id, other) = (h.ids[0], h.ids[1]);
        h.warm(id).await;
        h.warm(other).await;

        let request = UpdateUserRequest {
            first_name: Some("Changed".to_string()),
            ..Default::default()
        };
        let updated = h.handler.update_user(id, request).await.unwrap();
        assert_eq!(updated.first_name, "Changed");

        assert!(h.cached(&cache_keys::user_by_id(id)).await.is_none());
        assert!(h.cached(&cache_keys::users_list()).await.is_none());
        assert!(h.cached(&cache_keys::user_by_id(other)).await.is_some());
    }

    #[tokio::test]
    async fn test_read_after_update_sees_new_value() {
        let h = Harness::new(false, &["u@user.com"]);
        let id = h.ids[0];
        h.warm(id).await;

        let request = UpdateUserRequest {
            last_name: Some("Fresh".to_string()),
            ..Default::default()
        };
        h.handler.update_user(id, request).await.unwrap();

        assert_eq!(h.handler.get_user(id).await.unwrap().last_name, "Fresh");
        let list = h.handler.list_users(None).await.unwrap();
        assert_eq!(list[0].last_name, "Fresh");
    }

    #[tokio::test]
    async fn test_deactivate_invalidates_both_keys() {
        let h = Harness::new(false, &["d@user.com"]);
        let id = h.ids[0];
        h.warm(id).await;

        let updated = h.handler.deactivate_user(id).await.unwrap();
        assert!(!updated.is_active);

        assert!(h.cached(&cache_keys::user_by_id(id)).await.is_none());
        assert!(h.cached(&cache_keys::users_list()).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_invalidates_both_keys() {
        let h = Harness::new(false, &["x@user.com"]);
        let id = h.ids[0];
        h.warm(id).await;

        h.handler.delete_user(id).await.unwrap();

        assert!(h.cached(&cache_keys::user_by_id(id)).await.is_none());
        assert!(h.cached(&cache_keys::users_list()).await.is_none());
        assert!(matches!(
            h.handler.get_user(id).await,
            Err(RollcallError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_not_found_mutations_keep_cache() {
        let h = Harness::new(false, &["keep@user.com"]);
        h.warm(h.ids[0]).await;
        let list_before = h.cached(&cache_keys::users_list()).await;
        let missing = UserId::new();
        h.cache
            .set_raw(&cache_keys::user_by_id(missing), "\"stale\"", None)
            .await
            .unwrap();

        let update = h
            .handler
            .update_user(missing, UpdateUserRequest::default())
            .await;
        let deactivate = h.handler.deactivate_user(missing).await;
        let delete = h.handler.delete_user(missing).await;

        for result in [update.map(|_| ()), deactivate.map(|_| ()), delete] {
            assert!(matches!(result, Err(RollcallError::NotFound { .. })));
        }
        assert_eq!(h.cached(&cache_keys::users_list()).await, list_before);
        assert_eq!(
            h.cached(&cache_keys::user_by_id(missing)).await.as_deref(),
            Some("\"stale\"")
        );
    }

    #[tokio::test]
    async fn test_failed_store_mutation_keeps_cache() {
        let h = Harness::new(false, &["fail@user.com"]);
        let id = h.ids[0];
        h.warm(id).await;
        h.store.set_failing(true);

        let result = h.handler.delete_user(id).await;
        assert!(matches!(result, Err(RollcallError::Database(_))));
        assert!(h.cached(&cache_keys::user_by_id(id)).await.is_some());
        assert!(h.cached(&cache_keys::users_list()).await.is_some());
    }

    #[tokio::test]
    async fn test_invalidation_failure_propagates() {
        let profile = Profile::new("User");
        let existing = User::builder()
            .email(Email::new_unchecked("mock@user.com"))
            .profile_id(profile.id)
            .build()
            .unwrap();
        let id = existing.id;
        let store = Arc::new(InMemoryUserRepository::with_users([existing]));
        let profiles = Arc::new(InMemoryProfileRepository::with_profiles([profile]));

        let mut cache = MockCache::new();
        cache
            .expect_delete()
            .times(2)
            .returning(|_| Err(RollcallError::Cache("cache unavailable".to_string())));

        let handler = CachedUserServiceComponent::new(
            Arc::new(UserServiceComponent::new(store.clone(), profiles)),
            Arc::new(cache),
            false,
        );

        let result = handler.deactivate_user(id).await;
        assert!(matches!(result, Err(RollcallError::Cache(_))));
        assert!(!store.peek(id).unwrap().is_active);
    }

    #[tokio::test]
    async fn test_invalidation_attempts_both_keys() {
        let profile = Profile::new("User");
        let existing = User::builder()
            .email(Email::new_unchecked("half@user.com"))
            .profile_id(profile.id)
            .build()
            .unwrap();
        let id = existing.id;
        let store = Arc::new(InMemoryUserRepository::with_users([existing]));
        let profiles = Arc::new(InMemoryProfileRepository::with_profiles([profile]));

        let deleted = Arc::new(Mutex::new(Vec::new()));
        let recorded = deleted.clone();
        let mut cache = MockCache::new();
        cache.expect_delete().times(2).returning(move |key| {
            recorded.lock().push(key.to_string());
            if key.starts_with("user_") {
                Err(RollcallError::Cache("cache unavailable".to_string()))
            } else {
                Ok(true)
            }
        });

        let handler = CachedUserServiceComponent::new(
            Arc::new(UserServiceComponent::new(store.clone(), profiles)),
            Arc::new(cache),
            false,
        );

        let result = handler.deactivate_user(id).await;
        assert!(matches!(result, Err(RollcallError::Cache(_))));
        assert!(!store.peek(id).unwrap().is_active);
        assert_eq!(
            *deleted.lock(),
            vec![cache_keys::user_by_id(id), cache_keys::users_list()]
        );
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_is_an_error() {
        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .returning(|_| Ok(Some("not json".to_string())));

        let handler = CachedUserServiceComponent::new(
            Arc::new(UserServiceComponent::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryProfileRepository::new()),
            )),
            Arc::new(cache),
            false,
        );

        let result = handler.get_user(UserId::new()).await;
        assert!(matches!(result, Err(RollcallError::Internal(_))));
    }
}
