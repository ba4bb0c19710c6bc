//! # staff-config
//!
//! Layered configuration loading for staffdesk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STAFFDESK_*` prefix, `__` as separator)
//! 2. Project-level `.staffdesk/config.toml`
//! 3. User-level `~/.config/staffdesk/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `STAFFDESK_API__BASE_URL` -> `api.base_url`,
//! `STAFFDESK_DIRECTORY__PAGE_SIZE` -> `directory.page_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use staff_config::StaffConfig;
//!
//! let config = StaffConfig::load_with_dotenv().expect("config");
//! println!("API: {}", config.api.base_url());
//! ```

mod api;
mod dashboard;
mod directory;
mod error;
mod session;

pub use api::ApiConfig;
pub use dashboard::DashboardConfig;
pub use directory::DirectoryConfig;
pub use error::ConfigError;
pub use session::SessionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StaffConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl StaffConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can extract from it directly or layer extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".staffdesk/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("STAFFDESK_").split("__"))
    }

    /// Reject values the client cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "api".into(),
            });
        }
        if self.directory.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "directory.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.dashboard.max_concurrent_task_fetches == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.max_concurrent_task_fetches".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("staffdesk").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = StaffConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.directory.page_size, 10);
        assert_eq!(config.dashboard.max_concurrent_task_fetches, 8);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut config = StaffConfig::default();
        config.directory.page_size = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "directory.page_size"));
    }

    #[test]
    fn empty_base_url_is_not_configured() {
        let mut config = StaffConfig::default();
        config.api.base_url = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }
}
