//! Client repository trait.
//!
//! Defines the interface for the client store.

use super::model::{Client, ClientUpdate, NewClient, NewSession, Session, SessionUpdate};
use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// The sole authority over persisted client and session state.
///
/// Reads never fail: an unreadable backing document is treated as an empty
/// roster. Writes report failure through `Err`. Addressing an unknown id is
/// an ordinary `Ok(None)`, never an error.
///
/// # Implementation Notes
///
/// Every mutation works on the whole roster (read, change in memory, write
/// back). There is no locking between processes; the last writer wins.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Ensures the backing storage exists, creating an empty roster on first
    /// run. Safe to call on every startup.
    async fn initialize(&self) -> Result<()>;

    /// Location of the backing document.
    fn database_path(&self) -> PathBuf;

    /// Returns every client, unfiltered and unsorted.
    async fn list_clients(&self) -> Vec<Client>;

    /// Finds a client by id.
    async fn get_client(&self, id: &str) -> Option<Client>;

    /// Creates a client with a fresh id, the current time as `created_at`,
    /// status `active` and no sessions.
    async fn create_client(&self, fields: NewClient) -> Result<Client>;

    /// Merges `update` over the stored client.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Client))`: the updated client
    /// - `Ok(None)`: no client with this id; nothing was written
    /// - `Err(_)`: the roster could not be written
    async fn update_client(&self, id: &str, update: ClientUpdate) -> Result<Option<Client>>;

    /// Removes a client together with its sessions.
    ///
    /// Succeeds whether or not the id existed.
    async fn delete_client(&self, id: &str) -> Result<()>;

    /// Prepends a new session to the client's sessions.
    ///
    /// Returns `Ok(None)` without writing when the client does not exist.
    async fn add_session(&self, client_id: &str, session: NewSession) -> Result<Option<Session>>;

    /// Merges `update` over one session of one client.
    ///
    /// Returns `Ok(None)` without writing when either lookup fails.
    async fn update_session(
        &self,
        client_id: &str,
        session_id: &str,
        update: SessionUpdate,
    ) -> Result<Option<Session>>;
}
