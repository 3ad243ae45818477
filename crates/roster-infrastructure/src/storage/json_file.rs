//! Whole-document JSON file storage.
//!
//! The document is always read and written in full. Writes go through a
//! temporary file and a rename so a failed write leaves the previous
//! document in place. There is no cross-process locking.

use roster_core::RosterError;
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Errors that can occur during JSON file operations.
#[derive(Debug)]
pub enum JsonFileError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
}

impl std::fmt::Display for JsonFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonFileError::IoError(e) => write!(f, "I/O error: {}", e),
            JsonFileError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for JsonFileError {}

impl From<std::io::Error> for JsonFileError {
    fn from(e: std::io::Error) -> Self {
        JsonFileError::IoError(e)
    }
}

impl From<serde_json::Error> for JsonFileError {
    fn from(e: serde_json::Error) -> Self {
        JsonFileError::JsonError(e)
    }
}

impl From<JsonFileError> for RosterError {
    fn from(e: JsonFileError) -> Self {
        match e {
            JsonFileError::IoError(io) => io.into(),
            JsonFileError::JsonError(json) => json.into(),
        }
    }
}

/// A handle to a pretty-printed JSON document on disk.
pub struct JsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Loads and deserializes the document.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub async fn load(&self) -> Result<Option<T>, JsonFileError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Writes the whole document, replacing the previous one.
    pub async fn save(&self, data: &T) -> Result<(), JsonFileError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = fs::File::create(&tmp_path).await?;
        if let Err(e) = write_and_sync(&mut tmp_file, json.as_bytes()).await {
            drop(tmp_file);
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf, JsonFileError> {
        let parent = self.path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path has no parent directory")
        })?;
        let file_name = self.path.file_name().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path has no file name")
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

async fn write_and_sync(file: &mut fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.sync_all().await
}
