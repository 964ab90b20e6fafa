//! Derived-view cache configuration.
//!
//! Loaded from an optional file, then `THREADVIEW__*` environment variables
//! (e.g. `THREADVIEW__TTL_SECONDS=60`).

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_TTL_SECONDS: u64 = 300;
const MAX_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;
const DEFAULT_MAX_CAPACITY: u64 = 10_000;
const DEFAULT_NAMESPACE: &str = "threadview";
const ENV_PREFIX: &str = "THREADVIEW";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Configuracion del cache de vistas.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewCacheConfig {
    /// TTL en segundos, uniforme para todas las vistas (default: 300 = 5 minutos)
    pub ttl_seconds: u64,
    /// Maximo numero de entries del store en proceso (default: 10000)
    pub max_capacity: u64,
    /// Prefijo de las keys en el store; vacio para no usar prefijo
    pub namespace: String,
    /// Con `false` cada llamada recalcula la vista
    pub enabled: bool,
}

impl Default for ViewCacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            max_capacity: DEFAULT_MAX_CAPACITY,
            namespace: DEFAULT_NAMESPACE.to_string(),
            enabled: true,
        }
    }
}

impl ViewCacheConfig {
    /// Loads configuration from `path` (if given) and the environment.
    ///
    /// Values not set anywhere keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the cache cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ttl_seconds == 0 {
            return Err(ConfigError::invalid("ttl_seconds", "must be greater than 0"));
        }
        if self.ttl_seconds > MAX_TTL_SECONDS {
            return Err(ConfigError::invalid(
                "ttl_seconds",
                format!("must be at most {} (30 days)", MAX_TTL_SECONDS),
            ));
        }
        if self.max_capacity == 0 {
            return Err(ConfigError::invalid(
                "max_capacity",
                "must be greater than 0",
            ));
        }
        if self.namespace.contains(char::is_whitespace) {
            return Err(ConfigError::invalid(
                "namespace",
                "must not contain whitespace",
            ));
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}
