//! Engine configuration.
//!
//! Configuration is a plain YAML file with optional fields; anything absent
//! falls back to a built-in default. The engine never discovers files on its
//! own beyond [`default_config_path`]; callers decide what to load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::recurrence::DEFAULT_MAX_ITERATIONS;
use crate::store::default_data_dir;

/// Tunable settings for the booking engine.
///
/// Every field is optional so a partial file, or no file at all, is a valid
/// configuration. Unknown fields are rejected to catch typos early.
///
/// # Examples
///
/// ```
/// use zonebook::config::EngineConfig;
///
/// let config: EngineConfig = serde_yaml::from_str("max_expansion_iterations: 250\n").unwrap();
/// assert_eq!(config.expansion_limit(), 250);
///
/// let config = EngineConfig::default();
/// assert_eq!(config.expansion_limit(), zonebook::recurrence::DEFAULT_MAX_ITERATIONS);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Iteration cap for a single recurrence expansion.
    pub max_expansion_iterations: Option<u32>,

    /// Database file path, overriding the data-directory resolution.
    pub database_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder {
            config: Self::default(),
        }
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or if it is not valid
    /// YAML for this schema.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Loads configuration from a YAML file, or returns the defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The effective iteration cap for recurrence expansion.
    #[must_use]
    pub fn expansion_limit(&self) -> u32 {
        self.max_expansion_iterations
            .unwrap_or(DEFAULT_MAX_ITERATIONS)
    }

    /// The effective database path.
    ///
    /// Uses the configured override when present, otherwise resolves the
    /// standard data-directory location.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is configured and the home directory
    /// cannot be determined.
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => crate::store::resolve_database_path(),
        }
    }
}

/// Builder for creating `EngineConfig` instances in code.
#[derive(Debug)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Sets the iteration cap for recurrence expansion.
    #[must_use]
    pub const fn max_expansion_iterations(mut self, cap: u32) -> Self {
        self.config.max_expansion_iterations = Some(cap);
        self
    }

    /// Sets the database file path.
    #[must_use]
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.database_path = Some(path.into());
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> EngineConfig {
        self.config
    }
}

/// Default location of the engine configuration file, inside the data
/// directory.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(default_data_dir()?.join("config.yaml"))
}
