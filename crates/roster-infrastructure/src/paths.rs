//! Unified path management for roster data and configuration files.
//!
//! Platform directories come from the `dirs` crate, so the layout follows the
//! per-user conventions of Linux, macOS and Windows.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "roster";
const DATABASE_DIR: &str = "clients-database";
const DATABASE_FILE: &str = "clients.json";
const CONFIG_FILE: &str = "config.toml";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "ROSTER_DATA_DIR";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Neither a data nor a home directory could be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution for roster.
///
/// # Directory Structure
///
/// ```text
/// ~/.local/share/roster/          # Data directory (or the override)
/// └── clients-database/
///     └── clients.json            # The whole roster
///
/// ~/.config/roster/
/// └── config.toml                 # Application configuration
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterPaths {
    base_dir: Option<PathBuf>,
}

impl RosterPaths {
    /// Creates a resolver. `base_dir` replaces the platform data directory
    /// (used by tests and the `--data-dir` flag).
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the directory that holds the roster data.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: the override, or e.g. `~/.local/share/roster/`
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path of the roster document.
    pub fn database_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join(DATABASE_DIR).join(DATABASE_FILE))
    }

    /// Returns the roster configuration directory (e.g. `~/.config/roster/`).
    ///
    /// The config location is never affected by the data dir override.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path of `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_file_under_override() {
        let paths = RosterPaths::new(Some(Path::new("/tmp/roster-test")));
        let db = paths.database_file().unwrap();
        assert_eq!(
            db,
            PathBuf::from("/tmp/roster-test/clients-database/clients.json")
        );
    }

    #[test]
    fn test_default_data_dir() {
        if let Ok(data_dir) = RosterPaths::default().data_dir() {
            assert!(data_dir.ends_with("roster"));
        }
    }

    #[test]
    fn test_config_file() {
        if let Ok(config_file) = RosterPaths::config_file() {
            assert!(config_file.ends_with("config.toml"));
            let config_dir = RosterPaths::config_dir().unwrap();
            assert!(config_file.starts_with(&config_dir));
        }
    }
}
