//! # mks-config
//!
//! Layered configuration loading for mks using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MKS_*` prefix, `__` as separator)
//! 2. An explicit file passed on the command line (`--config`)
//! 3. Project-local `mks.toml`
//! 4. User-level `~/.config/mks/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MKS_HISTORY__START_YEAR` -> `history.start_year`,
//! `MKS_POLICY__ON_LIVE_ERROR` -> `policy.on_live_error`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use mks_config::MksConfig;
//!
//! let config = MksConfig::load_with_dotenv(None).expect("config");
//! println!("writing to {}", config.storage.path.display());
//! ```

mod error;
mod history;
mod merge;
mod policy;
mod sources;
mod storage;

pub use error::ConfigError;
pub use history::HistoryConfig;
pub use merge::MergeConfig;
pub use policy::{HistoryErrorPolicy, LiveErrorPolicy, PolicyConfig};
pub use sources::SourcesConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "mks.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MksConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl MksConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a layer fails to parse or a value
    /// has the wrong shape (including an invalid `merge.priority`), and
    /// [`ConfigError::InvalidValue`] if `explicit` does not name a file.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::InvalidValue {
                    field: "--config".to_string(),
                    reason: format!("{} is not a readable file", path.display()),
                });
            }
        }
        Self::figment(explicit).extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the working directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: user-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: explicit --config file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: environment variables (highest priority)
        figment.merge(Env::prefixed("MKS_").split("__"))
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty history year range
    /// or a zero request timeout.
    pub fn validate(&self, current_year: i32) -> Result<(), ConfigError> {
        self.history.years(current_year)?;
        if self.sources.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sources.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mks").join("config.toml"))
    }
}
