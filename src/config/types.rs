use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

/// Remote items source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the items service (e.g., "http://127.0.0.1:3000").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the items endpoint, appended to `base_url` (default: "/items").
    #[serde(default = "default_items_path")]
    pub items_path: String,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Initial selection and page geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Items per page (default: 8).
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Search query the view starts with.
    #[serde(default)]
    pub initial_query: String,
    /// Zero-based page the view starts on.
    #[serde(default)]
    pub initial_page: u64,
}

/// Items per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u64 = 8;

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_items_path() -> String {
    "/items".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl ProviderConfig {
    /// Items endpoint URL (`base_url` + `items_path`, without doubled slashes).
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.items_path.trim_start_matches('/')
        )
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            items_path: default_items_path(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            initial_query: String::new(),
            initial_page: 0,
        }
    }
}
