//! Dashboard aggregation settings.

use serde::{Deserialize, Serialize};

const fn default_max_concurrent_task_fetches() -> usize {
    8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    /// Upper bound on in-flight per-project task requests.
    #[serde(default = "default_max_concurrent_task_fetches")]
    pub max_concurrent_task_fetches: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            max_concurrent_task_fetches: default_max_concurrent_task_fetches(),
        }
    }
}
