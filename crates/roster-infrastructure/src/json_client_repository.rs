//! JSON file based ClientRepository implementation.
//!
//! The whole roster is one pretty-printed document. Every mutation reads the
//! full document, changes it in memory and writes it back in full.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use roster_core::client::{
    Client, ClientRepository, ClientUpdate, NewClient, NewSession, Session, SessionUpdate,
};
use roster_core::error::{Result, RosterError};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::dto::{ClientDto, DatabaseDto, SessionDto};
use crate::paths::RosterPaths;
use crate::storage::JsonFile;

/// File-based client repository.
///
/// Directory structure:
/// ```text
/// data_dir/
/// └── clients-database/
///     └── clients.json
/// ```
pub struct JsonClientRepository {
    file: JsonFile<DatabaseDto>,
}

impl JsonClientRepository {
    /// Creates a repository at the platform default location.
    pub fn default_location() -> Result<Self> {
        Self::new(None)
    }

    /// Creates a repository under a custom data directory (for testing and
    /// the `--data-dir` override).
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let path = RosterPaths::new(base_dir)
            .database_file()
            .map_err(|e| RosterError::config(e.to_string()))?;
        Ok(Self::with_file(path))
    }

    /// Creates a repository backed by an explicit file path.
    pub fn with_file(path: PathBuf) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// Reads the roster, degrading to an empty one on any failure.
    async fn read_database(&self) -> DatabaseDto {
        match self.file.load().await {
            Ok(Some(db)) => db,
            Ok(None) => {
                tracing::debug!(
                    "[JsonClientRepository] No roster at {:?}, starting empty",
                    self.file.path()
                );
                DatabaseDto::default()
            }
            Err(e) => {
                tracing::warn!(
                    "[JsonClientRepository] Failed to read roster at {:?}, treating it as empty: {}",
                    self.file.path(),
                    e
                );
                DatabaseDto::default()
            }
        }
    }

    async fn write_database(&self, db: &DatabaseDto) -> Result<()> {
        self.file.save(db).await.map_err(|e| {
            tracing::error!(
                "[JsonClientRepository] Failed to write roster at {:?}: {}",
                self.file.path(),
                e
            );
            RosterError::from(e)
        })
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait]
impl ClientRepository for JsonClientRepository {
    async fn initialize(&self) -> Result<()> {
        if self.file.exists().await {
            return Ok(());
        }
        tracing::info!(
            "[JsonClientRepository] Creating empty roster at {:?}",
            self.file.path()
        );
        self.write_database(&DatabaseDto::default()).await
    }

    fn database_path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    async fn list_clients(&self) -> Vec<Client> {
        self.read_database()
            .await
            .clients
            .iter()
            .map(Client::from)
            .collect()
    }

    async fn get_client(&self, id: &str) -> Option<Client> {
        self.read_database().await.find(id).map(Client::from)
    }

    async fn create_client(&self, fields: NewClient) -> Result<Client> {
        let mut db = self.read_database().await;

        let dto = ClientDto::create(new_id(), now_timestamp(), fields);
        let client = Client::from(&dto);
        db.clients.push(dto);

        self.write_database(&db).await?;
        tracing::info!("[JsonClientRepository] Created client {}", client.id);
        Ok(client)
    }

    async fn update_client(&self, id: &str, update: ClientUpdate) -> Result<Option<Client>> {
        let mut db = self.read_database().await;

        let Some(dto) = db.find_mut(id) else {
            tracing::debug!("[JsonClientRepository] update_client: no client {}", id);
            return Ok(None);
        };
        dto.apply(update);
        let client = Client::from(&*dto);

        self.write_database(&db).await?;
        Ok(Some(client))
    }

    async fn delete_client(&self, id: &str) -> Result<()> {
        let mut db = self.read_database().await;

        let before = db.clients.len();
        db.clients.retain(|c| c.id != id);
        if db.clients.len() == before {
            tracing::debug!("[JsonClientRepository] delete_client: no client {}", id);
        }

        // Written even when nothing matched; the caller always sees success
        // unless the disk refuses the write.
        self.write_database(&db).await
    }

    async fn add_session(&self, client_id: &str, session: NewSession) -> Result<Option<Session>> {
        let mut db = self.read_database().await;

        let Some(dto) = db.find_mut(client_id) else {
            tracing::debug!("[JsonClientRepository] add_session: no client {}", client_id);
            return Ok(None);
        };
        let new_session = SessionDto::new(new_id(), now_timestamp(), session.notes.unwrap_or_default());
        let created = Session::from(&new_session);
        dto.sessions_mut().insert(0, new_session);

        self.write_database(&db).await?;
        Ok(Some(created))
    }

    async fn update_session(
        &self,
        client_id: &str,
        session_id: &str,
        update: SessionUpdate,
    ) -> Result<Option<Session>> {
        let mut db = self.read_database().await;

        let Some(session) = db
            .find_mut(client_id)
            .and_then(|c| c.sessions.as_mut())
            .and_then(|sessions| sessions.iter_mut().find(|s| s.id == session_id))
        else {
            tracing::debug!(
                "[JsonClientRepository] update_session: no session {} for client {}",
                session_id,
                client_id
            );
            return Ok(None);
        };
        session.apply(update);
        let updated = Session::from(&*session);

        self.write_database(&db).await?;
        Ok(Some(updated))
    }
}
