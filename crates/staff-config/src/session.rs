//! Session persistence settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Where the signed-in session is persisted. Empty means `~/.staffdesk/session.json`.
    #[serde(default)]
    pub credentials_path: String,
}

impl SessionConfig {
    /// Resolve the session file path, or `None` if neither an explicit path
    /// nor a home directory is available.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        let explicit = self.credentials_path.trim();
        if !explicit.is_empty() {
            return Some(PathBuf::from(explicit));
        }
        dirs::home_dir().map(|h| h.join(".staffdesk").join(SESSION_FILE_NAME))
    }
}
