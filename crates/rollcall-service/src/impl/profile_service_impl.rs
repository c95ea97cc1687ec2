//! Profile service implementation.

use crate::cache::{cache_failure, cache_keys, CacheExt, CacheInterface};
use crate::dto::ProfileResponse;
use crate::profile_service::ProfileService;
use async_trait::async_trait;
use rollcall_core::RollcallResult;
use rollcall_repository::ProfileRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, error};

/// Profile service component for Shaku DI.
///
/// Profiles only change through seeding, so the list is cached on first read
/// and never invalidated.
#[derive(Component)]
#[shaku(interface = ProfileService)]
pub struct ProfileServiceComponent {
    #[shaku(inject)]
    profile_repository: Arc<dyn ProfileRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl ProfileServiceComponent {
    #[must_use]
    pub fn new(
        profile_repository: Arc<dyn ProfileRepository>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            profile_repository,
            cache,
        }
    }
}

#[async_trait]
impl ProfileService for ProfileServiceComponent {
    async fn list_profiles(&self) -> RollcallResult<Vec<ProfileResponse>> {
        let key = cache_keys::profiles_list();

        if let Some(cached) = self
            .cache
            .get::<Vec<ProfileResponse>>(&key)
            .await
            .map_err(|e| cache_failure(&key, e))?
        {
            debug!("Cache hit for profile list");
            return Ok(cached);
        }

        let profiles: Vec<ProfileResponse> = self
            .profile_repository
            .find_all()
            .await
            .map_err(|e| {
                error!("List profiles failed: {}", e);
                e
            })?
            .into_iter()
            .map(ProfileResponse::from)
            .collect();

        self.cache
            .set(&key, &profiles)
            .await
            .map_err(|e| cache_failure(&key, e))?;
        Ok(profiles)
    }
}
