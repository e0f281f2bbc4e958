//! # scrud-config
//!
//! Layered configuration loading for Scrud using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SCRUD_*` prefix, `__` as separator)
//! 2. Project-level `.scrud/config.toml`
//! 3. User-level `~/.config/scrud/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SCRUD_DATABASE__PATH` -> `database.path`,
//! `SCRUD_GRADING__MAX_SCORE` -> `grading.max_score`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use scrud_config::ScrudConfig;
//!
//! let config = ScrudConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//! println!("store: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod grading;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use grading::GradingConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScrudConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl ScrudConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`. Use [`Self::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".scrud/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SCRUD_").split("__"))
    }

    /// Reject values no store or grading scale can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.database.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "database".into(),
            });
        }
        if self.database.change_feed_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.change_feed_capacity".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !(self.grading.max_score.is_finite() && self.grading.max_score > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "grading.max_score".into(),
                reason: format!("must be positive, got {}", self.grading.max_score),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scrud").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current dir.
    /// Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
