//! Employee directory (paginated list) settings.

use serde::{Deserialize, Serialize};

const fn default_page_size() -> u32 {
    10
}

const fn default_debounce_ms() -> u64 {
    400
}

fn default_sort_field() -> String {
    "id".to_string()
}

const fn default_sort_descending() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectoryConfig {
    /// Server page size (`limit` query parameter).
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Quiet period after the last search keystroke before refetching.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Initial `ordering` field.
    #[serde(default = "default_sort_field")]
    pub sort_field: String,

    /// Whether the initial ordering is descending.
    #[serde(default = "default_sort_descending")]
    pub sort_descending: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
            sort_field: default_sort_field(),
            sort_descending: default_sort_descending(),
        }
    }
}
