//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use reelcache_core::ReelError;
use std::path::Path;
use tracing::{debug, info};

/// Prefix for structured environment overrides (`REELCACHE__REDIS__TTL_SECS`).
const ENV_PREFIX: &str = "REELCACHE";

/// Plain environment variables understood for compatibility with existing deployments.
///
/// These take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct LegacyEnv {
    /// `TMDB_API_KEY`, mapped to `provider.api_key`.
    pub tmdb_api_key: Option<String>,
    /// `REDIS_URL`, mapped to `redis.url`.
    pub redis_url: Option<String>,
    /// `CACHE_TTL` in seconds, mapped to `redis.ttl_secs`.
    pub cache_ttl: Option<String>,
}

impl LegacyEnv {
    /// Reads the plain variables from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            tmdb_api_key: std::env::var("TMDB_API_KEY").ok(),
            redis_url: std::env::var("REDIS_URL").ok(),
            cache_ttl: std::env::var("CACHE_TTL").ok(),
        }
    }
}

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. Built-in defaults
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml`
    /// 4. `config/local.toml`
    /// 5. Environment variables with `REELCACHE__` prefix
    /// 6. `TMDB_API_KEY`, `REDIS_URL` and `CACHE_TTL`
    pub fn new(config_dir: impl Into<String>) -> Result<Self, ReelError> {
        let config_dir = config_dir.into();

        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("REELCACHE_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let config = Self::load_config(
            &config_dir,
            &environment,
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
            &LegacyEnv::from_env(),
        )?;

        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, ReelError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    /// Builds and validates the configuration from explicit sources.
    pub fn load_config(
        config_dir: &str,
        environment: &str,
        env_source: Environment,
        legacy: &LegacyEnv,
    ) -> Result<AppConfig, ReelError> {
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment, "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config file: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(env_source);

        let cache_ttl = legacy
            .cache_ttl
            .as_deref()
            .map(|raw| {
                raw.trim().parse::<i64>().map_err(|_| {
                    ReelError::Configuration(format!("CACHE_TTL must be a number of seconds, got '{}'", raw))
                })
            })
            .transpose()?;

        builder = builder
            .set_override_option("provider.api_key", legacy.tmdb_api_key.clone())
            .and_then(|b| b.set_override_option("redis.url", legacy.redis_url.clone()))
            .and_then(|b| b.set_override_option("redis.ttl_secs", cache_ttl))
            .map_err(config_error_to_reel_error)?;

        let app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error_to_reel_error)?;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| ReelError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

fn config_error_to_reel_error(err: ConfigError) -> ReelError {
    ReelError::Configuration(err.to_string())
}
