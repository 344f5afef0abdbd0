//! Layered application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `PACKSHOT_*` environment variables. Nested keys use a double
//! underscore, e.g. `PACKSHOT_PIPELINE__CONCURRENCY_LIMIT=5`.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use packshot_error::ConfigError;
use packshot_pipeline::PipelineConfig;
use packshot_rate_limit::{RateLimitConfig, RetryConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Config file read when none is given explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "packshot.toml";

/// Environment variable prefix for overrides.
pub const CONFIG_ENV_PREFIX: &str = "PACKSHOT";

/// Everything the binary needs besides provider credentials.
///
/// # Examples
///
/// ```
/// use packshot::AppConfig;
///
/// let config = AppConfig::default();
/// assert_eq!(*config.pipeline().concurrency_limit(), 3);
/// assert_eq!(config.retry().max_attempts, 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct AppConfig {
    /// Pipeline tuning
    pipeline: PipelineConfig,
    /// Retry policy for inference calls
    retry: RetryConfig,
    /// Provider rate limits
    rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Loads configuration from `path` (or [`DEFAULT_CONFIG_FILE`] when it
    /// exists) and the process environment.
    ///
    /// An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Self::environment())
    }

    /// Like [`AppConfig::load`], with a caller-supplied environment source.
    #[instrument(skip(env))]
    pub fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let config: Self = Config::builder()
            .add_source(file)
            .add_source(env)
            .build()
            .and_then(|built| built.try_deserialize())
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?;

        config.validate()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// The `PACKSHOT_*` environment source.
    pub fn environment() -> Environment {
        Environment::with_prefix(CONFIG_ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
    }

    /// Renders the resolved configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to render configuration: {}", e)))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if *self.pipeline.max_edge() == 0 {
            return Err(ConfigError::new("pipeline.max_edge must be positive"));
        }
        if !(1..=100).contains(self.pipeline.jpeg_quality()) {
            return Err(ConfigError::new("pipeline.jpeg_quality must be within 1..=100"));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::new("retry.max_attempts must be at least 1"));
        }
        let multiplier = self.retry.backoff_multiplier;
        if !multiplier.is_finite() || multiplier < 1.0 {
            return Err(ConfigError::new(
                "retry.backoff_multiplier must be a finite number of at least 1.0",
            ));
        }
        if *self.rate_limit.max_concurrent() == Some(0) {
            return Err(ConfigError::new(
                "rate_limit.max_concurrent must be positive; omit it for no cap",
            ));
        }
        Ok(())
    }
}
