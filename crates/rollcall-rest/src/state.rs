//! Application state for Axum handlers.

use rollcall_core::HealthCheck;
use rollcall_service::{CachedUserService, ProfileService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aware user handler. Controllers never reach the plain service.
    pub users: Arc<dyn CachedUserService>,
    pub profiles: Arc<dyn ProfileService>,
    /// Health checks consulted by `/ready`.
    pub health_checks: Arc<Vec<Arc<dyn HealthCheck>>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        users: Arc<dyn CachedUserService>,
        profiles: Arc<dyn ProfileService>,
        health_checks: Vec<Arc<dyn HealthCheck>>,
    ) -> Self {
        Self {
            users,
            profiles,
            health_checks: Arc::new(health_checks),
        }
    }

    /// Resolves the services from a Shaku module.
    pub fn from_module<M>(module: &M, health_checks: Vec<Arc<dyn HealthCheck>>) -> Self
    where
        M: Module + HasComponent<dyn CachedUserService> + HasComponent<dyn ProfileService>,
    {
        Self::new(module.resolve(), module.resolve(), health_checks)
    }
}
