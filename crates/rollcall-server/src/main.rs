//! # Rollcall Server
//!
//! Entry point: loads configuration, prepares the database, wires the DI
//! module and serves the REST API until a shutdown signal arrives.

use anyhow::Context;
use rollcall_config::{AppConfig, ConfigLoader};
use rollcall_repository::{
    seed_default_profiles, DatabaseHealthCheck, DatabasePool, DatabasePoolInterface,
};
use rollcall_rest::create_router;
use rollcall_server::{
    di::{build_app_module, DatabaseResolver},
    startup::{init_logging, print_banner, print_startup_info, shutdown_signal},
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get(),
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();
    info!("Starting Rollcall server, version {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let pool = DatabasePool::connect(&config.database).await?;

    if config.database.run_migrations {
        pool.run_migrations().await?;
    }
    if config.database.seed_profiles {
        seed_default_profiles(&pool).await?;
    }

    let module = build_app_module(pool, &config.cache);
    let db_pool = module.database_pool();
    let health_checks: Vec<Arc<dyn rollcall_core::HealthCheck>> =
        vec![Arc::new(DatabaseHealthCheck::new(db_pool.clone()))];

    let router = create_router(module.as_ref(), health_checks, &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    print_startup_info(&config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("REST server error")?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}
