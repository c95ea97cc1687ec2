//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use rollcall_core::RollcallError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Environment variable selecting the `{environment}.toml` overlay.
pub const ENVIRONMENT_VAR: &str = "ROLLCALL_ENVIRONMENT";

/// Prefix for per-key overrides, e.g. `ROLLCALL__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "ROLLCALL";

/// Configuration loader with layered sources.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<AppConfig>,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `{config_dir}/default.toml`
    /// 2. `{config_dir}/{environment}.toml`
    /// 3. `{config_dir}/local.toml` (not committed)
    /// 4. Environment variables with the `ROLLCALL__` prefix
    ///
    /// # Errors
    ///
    /// Fails when a source cannot be parsed or the merged result is invalid.
    pub fn new(config_dir: impl Into<PathBuf>) -> Result<Self, RollcallError> {
        let config = Self::load_config(&config_dir.into())?;

        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Loads configuration from the default location (`./config`).
    ///
    /// # Errors
    ///
    /// See [`ConfigLoader::new`].
    pub fn from_default_location() -> Result<Self, RollcallError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> AppConfig {
        self.config.as_ref().clone()
    }

    fn load_config(config_dir: &Path) -> Result<AppConfig, RollcallError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config layer from: {}", path.display());
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize::<AppConfig>())
            .map_err(config_error_to_rollcall_error)?;

        ConfigValidator::validate(&app_config).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            RollcallError::Configuration(message)
        })?;

        Ok(app_config)
    }
}

fn config_error_to_rollcall_error(err: ConfigError) -> RollcallError {
    RollcallError::Configuration(err.to_string())
}
