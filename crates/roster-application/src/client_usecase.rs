//! Client use case.
//!
//! Coordinates the explicit [`ViewState`] with the client store. Each flow
//! issues store requests, waits for the result and moves the view state the
//! way the screen would: opening pages, closing edit blocks once a save went
//! through, and resolving the unsaved-changes and delete prompts.

use roster_core::client::{
    Client, ClientRepository, ClientStatus, ClientUpdate, NewClient, NewSession, Session,
    SessionUpdate, Therapy,
};
use roster_core::error::{Result, RosterError};
use roster_core::view::{ClientRow, Page, ViewState, filter_and_sort, sessions_newest_first};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Contents of the administrative block on the client page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminFields {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub phone: String,
    pub telegram: String,
    pub email: String,
    pub age: String,
    pub price: String,
    pub therapy: Therapy,
}

impl From<&Client> for AdminFields {
    fn from(client: &Client) -> Self {
        Self {
            last_name: client.last_name.clone(),
            first_name: client.first_name.clone(),
            middle_name: client.middle_name.clone(),
            phone: client.phone.clone(),
            telegram: client.telegram.clone(),
            email: client.email.clone(),
            age: client.age.clone(),
            price: client.price.clone(),
            therapy: client.therapy,
        }
    }
}

impl From<AdminFields> for ClientUpdate {
    fn from(fields: AdminFields) -> Self {
        ClientUpdate {
            last_name: Some(fields.last_name),
            first_name: Some(fields.first_name),
            middle_name: Some(fields.middle_name),
            phone: Some(fields.phone),
            telegram: Some(fields.telegram),
            email: Some(fields.email),
            age: Some(fields.age),
            price: Some(fields.price),
            therapy: Some(fields.therapy),
            ..ClientUpdate::default()
        }
    }
}

/// Contents of the request/history block on the client page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestFields {
    pub request: String,
    pub experience: String,
    pub comment: String,
}

impl From<&Client> for RequestFields {
    fn from(client: &Client) -> Self {
        Self {
            request: client.request.clone(),
            experience: client.experience.clone(),
            comment: client.comment.clone(),
        }
    }
}

impl From<RequestFields> for ClientUpdate {
    fn from(fields: RequestFields) -> Self {
        ClientUpdate {
            request: Some(fields.request),
            experience: Some(fields.experience),
            comment: Some(fields.comment),
            ..ClientUpdate::default()
        }
    }
}

/// What the client page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPage {
    pub client: Client,
    /// Sessions ordered newest first for display.
    pub sessions: Vec<Session>,
}

impl From<Client> for ClientPage {
    fn from(client: Client) -> Self {
        let sessions = sessions_newest_first(&client.sessions);
        Self { client, sessions }
    }
}

/// Unsaved input held by the front end when the user chooses "save" on the
/// unsaved-changes prompt. Only the blocks that are open for edit are saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingDrafts {
    pub admin: Option<AdminFields>,
    pub request: Option<RequestFields>,
    pub new_session_notes: Option<String>,
    pub edited_session_notes: Option<String>,
}

/// Interaction flows over a client store.
pub struct ClientUseCase {
    repository: Arc<dyn ClientRepository>,
}

impl ClientUseCase {
    pub fn new(repository: Arc<dyn ClientRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn ClientRepository> {
        &self.repository
    }

    /// Rows of the client list, filtered by the view's search query and
    /// ordered newest first. Always re-fetches the full roster.
    pub async fn list_rows(&self, view: &ViewState) -> Vec<ClientRow> {
        let clients = self.repository.list_clients().await;
        filter_and_sort(clients, &view.search_query)
            .iter()
            .map(ClientRow::from)
            .collect()
    }

    /// Submits the new-client form and returns to the list.
    pub async fn submit_new_client(
        &self,
        view: &mut ViewState,
        fields: NewClient,
    ) -> Result<Client> {
        let client = self.repository.create_client(fields).await?;
        tracing::info!("[ClientUseCase] Client created: {}", client.id);
        view.has_unsaved_changes = false;
        view.navigate_to(Page::ClientsList);
        Ok(client)
    }

    /// Opens the client page. When the client no longer exists the view goes
    /// back to the list and `None` is returned.
    pub async fn open_client(&self, view: &mut ViewState, client_id: &str) -> Option<ClientPage> {
        match self.repository.get_client(client_id).await {
            Some(client) => {
                view.open_client(client_id);
                Some(ClientPage::from(client))
            }
            None => {
                tracing::debug!("[ClientUseCase] Client {} not found, back to list", client_id);
                view.back_to_list();
                None
            }
        }
    }

    fn current_client(view: &ViewState) -> Result<String> {
        view.current_client_id()
            .map(str::to_string)
            .ok_or_else(|| RosterError::invalid_input("no client page is open"))
    }

    /// Saves the administrative block; the block leaves edit mode only when
    /// the client was found and written.
    pub async fn save_admin_block(
        &self,
        view: &mut ViewState,
        fields: AdminFields,
    ) -> Result<Option<Client>> {
        let client_id = Self::current_client(view)?;
        let updated = self.repository.update_client(&client_id, fields.into()).await?;
        if updated.is_some() {
            view.end_admin_edit();
        }
        Ok(updated)
    }

    /// Saves the request/history block.
    pub async fn save_request_block(
        &self,
        view: &mut ViewState,
        fields: RequestFields,
    ) -> Result<Option<Client>> {
        let client_id = Self::current_client(view)?;
        let updated = self.repository.update_client(&client_id, fields.into()).await?;
        if updated.is_some() {
            view.end_request_edit();
        }
        Ok(updated)
    }

    /// Changes only the status of the open client.
    pub async fn change_status(
        &self,
        view: &ViewState,
        status: ClientStatus,
    ) -> Result<Option<Client>> {
        let client_id = Self::current_client(view)?;
        self.repository
            .update_client(&client_id, ClientUpdate::status(status))
            .await
    }

    /// Saves the session being drafted and returns the refreshed page.
    pub async fn save_new_session(
        &self,
        view: &mut ViewState,
        notes: String,
    ) -> Result<Option<ClientPage>> {
        let client_id = Self::current_client(view)?;
        let session = self
            .repository
            .add_session(&client_id, NewSession::with_notes(notes))
            .await?;
        if session.is_none() {
            return Ok(None);
        }
        view.end_new_session();
        Ok(self.reload_page(&client_id).await)
    }

    /// Saves the session open for edit and returns the refreshed page.
    pub async fn save_edited_session(
        &self,
        view: &mut ViewState,
        notes: String,
    ) -> Result<Option<ClientPage>> {
        let client_id = Self::current_client(view)?;
        let session_id = view
            .editing_session_id
            .clone()
            .ok_or_else(|| RosterError::invalid_input("no session is being edited"))?;

        let updated = self
            .repository
            .update_session(&client_id, &session_id, SessionUpdate::notes(notes))
            .await?;
        if updated.is_none() {
            return Ok(None);
        }
        view.end_session_edit();
        Ok(self.reload_page(&client_id).await)
    }

    async fn reload_page(&self, client_id: &str) -> Option<ClientPage> {
        self.repository
            .get_client(client_id)
            .await
            .map(ClientPage::from)
    }

    /// "Save" branch of the unsaved-changes prompt on the client page: saves
    /// every open block, then returns to the list.
    pub async fn save_all_and_leave(
        &self,
        view: &mut ViewState,
        drafts: PendingDrafts,
    ) -> Result<()> {
        if view.editing_admin
            && let Some(admin) = drafts.admin
        {
            self.save_admin_block(view, admin).await?;
        }
        if view.editing_request
            && let Some(request) = drafts.request
        {
            self.save_request_block(view, request).await?;
        }
        if view.new_session_mode
            && let Some(notes) = drafts.new_session_notes
        {
            self.save_new_session(view, notes).await?;
        }
        if view.editing_session_id.is_some()
            && let Some(notes) = drafts.edited_session_notes
        {
            self.save_edited_session(view, notes).await?;
        }
        view.back_to_list();
        Ok(())
    }

    /// "Don't save" branch: drops every edit and returns to the list.
    pub fn discard_and_leave(&self, view: &mut ViewState) {
        view.back_to_list();
    }

    /// Opens the delete confirmation for a client.
    pub fn request_delete(&self, view: &mut ViewState, client_id: &str) {
        view.request_delete(client_id);
    }

    pub fn cancel_delete(&self, view: &mut ViewState) {
        view.cancel_delete();
    }

    /// Deletes the client awaiting confirmation and returns the refreshed
    /// list. Without a pending confirmation nothing is deleted.
    pub async fn confirm_delete(&self, view: &mut ViewState) -> Result<Vec<ClientRow>> {
        if let Some(client_id) = view.take_pending_delete() {
            self.repository.delete_client(&client_id).await?;
            tracing::info!("[ClientUseCase] Client deleted: {}", client_id);
        }
        Ok(self.list_rows(view).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::view::LeaveOutcome;
    use roster_infrastructure::JsonClientRepository;
    use tempfile::TempDir;

    async fn create_usecase() -> (ClientUseCase, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonClientRepository::new(Some(temp_dir.path())).unwrap();
        repo.initialize().await.unwrap();
        (ClientUseCase::new(Arc::new(repo)), temp_dir)
    }

    #[tokio::test]
    async fn test_new_client_flow_returns_to_list() {
        let (usecase, _dir) = create_usecase().await;
        let mut view = ViewState::new();
        view.navigate_to(Page::NewClient);
        view.mark_form_dirty();

        let client = usecase
            .submit_new_client(&mut view, NewClient::named("Ivanov", "Petr"))
            .await
            .unwrap();

        assert_eq!(view.page, Page::ClientsList);
        assert!(!view.has_unsaved_changes);
        let rows = usecase.list_rows(&view).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, client.id);
    }

    #[tokio::test]
    async fn test_search_filters_rows() {
        let (usecase, _dir) = create_usecase().await;
        let mut view = ViewState::new();
        usecase
            .submit_new_client(&mut view, NewClient::named("Ivanov", "Petr"))
            .await
            .unwrap();
        usecase
            .submit_new_client(&mut view, NewClient::named("Smirnova", "Olga"))
            .await
            .unwrap();

        view.set_search("olga");
        let rows = usecase.list_rows(&view).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Smirnova Olga");

        view.clear_search();
        assert_eq!(usecase.list_rows(&view).await.len(), 2);
    }

    #[tokio::test]
    async fn test_open_missing_client_goes_back_to_list() {
        let (usecase, _dir) = create_usecase().await;
        let mut view = ViewState::new();
        view.open_client("gone");

        assert!(usecase.open_client(&mut view, "gone").await.is_none());
        assert_eq!(view.page, Page::ClientsList);
    }

    #[tokio::test]
    async fn test_admin_block_save_closes_edit_mode() {
        let (usecase, _dir) = create_usecase().await;
        let mut view = ViewState::new();
        let client = usecase
            .submit_new_client(&mut view, NewClient::named("Ivanov", "Petr"))
            .await
            .unwrap();

        let page = usecase.open_client(&mut view, &client.id).await.unwrap();
        view.begin_admin_edit();
        let mut fields = AdminFields::from(&page.client);
        fields.phone = "555".to_string();

        let updated = usecase
            .save_admin_block(&mut view, fields)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.phone, "555");
        assert_eq!(updated.request, client.request);
        assert!(!view.editing_admin);
    }

    #[tokio::test]
    async fn test_request_block_and_status() {
        let (usecase, _dir) = create_usecase().await;
        let mut view = ViewState::new();
        let client = usecase
            .submit_new_client(&mut view, NewClient::named("Ivanov", "Petr"))
            .await
            .unwrap();
        usecase.open_client(&mut view, &client.id).await.unwrap();

        view.begin_request_edit();
        let updated = usecase
            .save_request_block(
                &mut view,
                RequestFields {
                    request: "Anxiety".to_string(),
                    ..RequestFields::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.request, "Anxiety");
        assert!(!view.editing_request);

        let paused = usecase
            .change_status(&view, ClientStatus::Pause)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(paused.status, ClientStatus::Pause);
        assert_eq!(paused.request, "Anxiety");
    }

    #[tokio::test]
    async fn test_session_flows() {
        let (usecase, _dir) = create_usecase().await;
        let mut view = ViewState::new();
        let client = usecase
            .submit_new_client(&mut view, NewClient::named("Ivanov", "Petr"))
            .await
            .unwrap();
        usecase.open_client(&mut view, &client.id).await.unwrap();

        view.begin_new_session();
        let page = usecase
            .save_new_session(&mut view, "first visit".to_string())
            .await
            .unwrap()
            .unwrap();
        assert!(!view.new_session_mode);
        assert_eq!(page.sessions.len(), 1);

        view.begin_session_edit(page.sessions[0].id.clone());
        let page = usecase
            .save_edited_session(&mut view, "first visit, revised".to_string())
            .await
            .unwrap()
            .unwrap();
        assert!(view.editing_session_id.is_none());
        assert_eq!(page.sessions[0].notes, "first visit, revised");
    }

    #[tokio::test]
    async fn test_edit_of_vanished_session_stays_open() {
        let (usecase, _dir) = create_usecase().await;
        let mut view = ViewState::new();
        let client = usecase
            .submit_new_client(&mut view, NewClient::named("Ivanov", "Petr"))
            .await
            .unwrap();
        usecase.open_client(&mut view, &client.id).await.unwrap();

        view.begin_session_edit("gone".to_string());
        let page = usecase
            .save_edited_session(&mut view, "lost".to_string())
            .await
            .unwrap();

        assert!(page.is_none());
        assert_eq!(view.editing_session_id.as_deref(), Some("gone"));
    }

    #[tokio::test]
    async fn test_save_all_and_leave() {
        let (usecase, _dir) = create_usecase().await;
        let mut view = ViewState::new();
        let client = usecase
            .submit_new_client(&mut view, NewClient::named("Ivanov", "Petr"))
            .await
            .unwrap();
        usecase.open_client(&mut view, &client.id).await.unwrap();

        view.begin_request_edit();
        view.begin_new_session();
        assert_eq!(view.leave_page(), LeaveOutcome::PromptSave);

        usecase
            .save_all_and_leave(
                &mut view,
                PendingDrafts {
                    request: Some(RequestFields {
                        comment: "call first".to_string(),
                        ..RequestFields::default()
                    }),
                    new_session_notes: Some("intake".to_string()),
                    ..PendingDrafts::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(view.page, Page::ClientsList);
        let stored = usecase.repository().get_client(&client.id).await.unwrap();
        assert_eq!(stored.comment, "call first");
        assert_eq!(stored.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_discard_and_leave_writes_nothing() {
        let (usecase, _dir) = create_usecase().await;
        let mut view = ViewState::new();
        let client = usecase
            .submit_new_client(&mut view, NewClient::named("Ivanov", "Petr"))
            .await
            .unwrap();
        usecase.open_client(&mut view, &client.id).await.unwrap();
        view.begin_admin_edit();

        usecase.discard_and_leave(&mut view);
        assert_eq!(view.page, Page::ClientsList);
        assert!(!view.is_editing());
        assert_eq!(
            usecase.repository().get_client(&client.id).await,
            Some(client)
        );
    }

    #[tokio::test]
    async fn test_delete_needs_confirmation() {
        let (usecase, _dir) = create_usecase().await;
        let mut view = ViewState::new();
        let client = usecase
            .submit_new_client(&mut view, NewClient::named("Ivanov", "Petr"))
            .await
            .unwrap();

        usecase.request_delete(&mut view, &client.id);
        usecase.cancel_delete(&mut view);
        assert_eq!(usecase.confirm_delete(&mut view).await.unwrap().len(), 1);

        usecase.request_delete(&mut view, &client.id);
        assert!(usecase.confirm_delete(&mut view).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_flows_without_open_client_are_rejected() {
        let (usecase, _dir) = create_usecase().await;
        let view = ViewState::new();
        let err = usecase
            .change_status(&view, ClientStatus::Archive)
            .await
            .unwrap_err();
        assert!(matches!(err, RosterError::InvalidInput(_)));
    }
}
