//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml` in the roster config directory.
//! A missing file yields the defaults; an unreadable or invalid file yields
//! the defaults plus a warning.

use roster_core::config::AppConfig;
use roster_core::error::{Result, RosterError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::paths::RosterPaths;

/// Configuration service that loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Uses the platform config location.
    pub fn new() -> Self {
        Self {
            path: RosterPaths::config_file().ok(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses an explicit config file (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> AppConfig {
        if let Ok(read_lock) = self.config.read()
            && let Some(ref cached) = *read_lock
        {
            return cached.clone();
        }

        let loaded = match &self.path {
            Some(path) => Self::load_config(path).unwrap_or_else(|e| {
                tracing::warn!("[ConfigService] Using default configuration: {}", e);
                AppConfig::default()
            }),
            None => AppConfig::default(),
        };

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    fn load_config(path: &Path) -> Result<AppConfig> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AppConfig::default());
            }
            Err(e) => {
                return Err(RosterError::io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };
        Ok(toml::from_str(&content)?)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
