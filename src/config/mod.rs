//! Configuration module for tuning-db
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`TUNING_DB_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use tuning_db::config::TuningDbConfig;
//!
//! let config = TuningDbConfig::default();
//! assert_eq!(config.server.port, 8080);
//!
//! let toml = r#"
//! [server]
//! port = 9000
//!
//! [tuning]
//! innodb_io_capacity = 1000
//! "#;
//! let config: TuningDbConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 9000);
//! assert_eq!(config.tuning.innodb_io_capacity_max(), 2000);
//! ```

pub mod error;
pub mod logging;
pub mod output;
pub mod server;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use output::{OutputConfig, ResponseFormat};
pub use server::ServerConfig;

pub use crate::tuning::TuningDefaults;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the tuning service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TuningDbConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Response format and artifact persistence
    pub output: OutputConfig,
    /// Baseline MySQL parameters
    pub tuning: TuningDefaults,
}

impl TuningDbConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                    path: p.to_path_buf(),
                    source,
                })?;
                toml::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: p.to_path_buf(),
                    source,
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("TUNING_DB_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("TUNING_DB_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("TUNING_DB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TUNING_DB_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(persist) = std::env::var("TUNING_DB_PERSIST") {
            match persist.to_lowercase().as_str() {
                "true" | "1" => self.output.persist = true,
                "false" | "0" => self.output.persist = false,
                _ => {}
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                field: "output.path".to_string(),
                message: "path cannot be empty".to_string(),
            });
        }

        self.tuning
            .validate()
            .map_err(|(field, message)| ConfigError::Validation {
                field: format!("tuning.{}", field),
                message,
            })?;

        Ok(())
    }
}
