use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Overrides the platform data directory that holds the roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: default_log_level(),
        }
    }
}
