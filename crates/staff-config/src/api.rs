//! Backend API connection settings.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "staffdesk/0.1".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Root of the REST API, without a trailing slash (e.g. `https://hr.example.com/api`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Check if a base URL is set.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ApiConfig::default();
        assert!(config.is_configured());
        assert_eq!(config.base_url(), "http://localhost:8000/api");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig {
            base_url: "https://hr.example.com/api/".into(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "https://hr.example.com/api");
    }

    #[test]
    fn blank_url_is_not_configured() {
        let config = ApiConfig {
            base_url: "  ".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
