//! Main application router.

use crate::{
    controllers::{health_controller, profile_controller, user_controller},
    middleware::logging_middleware,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use rollcall_config::ServerConfig;
use rollcall_core::HealthCheck;
use rollcall_service::{CachedUserService, ProfileService};
use shaku::{HasComponent, Module};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the application router from a Shaku module.
pub fn create_router<M>(
    module: &M,
    health_checks: Vec<Arc<dyn HealthCheck>>,
    server_config: &ServerConfig,
) -> Router
where
    M: Module + HasComponent<dyn CachedUserService> + HasComponent<dyn ProfileService>,
{
    build_router(AppState::from_module(module, health_checks), server_config)
}

/// Creates the application router from ready-made state.
pub fn build_router(state: AppState, server_config: &ServerConfig) -> Router {
    let api_router = Router::new()
        .nest("/users", user_controller::router())
        .nest("/profile", profile_controller::router());

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .route("/", get(root))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(create_cors_layer(server_config))
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(server_config.request_timeout())),
        )
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints under /api/v1");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }
    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Rollcall API v1"
}
