use roster_core::client::{Client, ClientStatus, ClientUpdate, NewClient};
use roster_core::view::{ClientRow, ViewState};
use roster_application::ClientPage;

use crate::app::AppState;

/// Lists every client as stored
pub async fn get_clients(state: &AppState) -> Result<Vec<Client>, String> {
    Ok(state.client_repository.list_clients().await)
}

/// Lists client rows filtered by `query`, newest first
pub async fn list_client_rows(state: &AppState, query: &str) -> Result<Vec<ClientRow>, String> {
    let mut view = ViewState::new();
    view.set_search(query);
    Ok(state.client_usecase.list_rows(&view).await)
}

/// Gets a client by ID
pub async fn get_client(state: &AppState, id: &str) -> Result<Option<Client>, String> {
    Ok(state.client_repository.get_client(id).await)
}

/// Gets the client page (client plus sessions newest first)
pub async fn get_client_page(state: &AppState, id: &str) -> Result<Option<ClientPage>, String> {
    let mut view = ViewState::new();
    Ok(state.client_usecase.open_client(&mut view, id).await)
}

/// Creates a new client
pub async fn add_client(state: &AppState, fields: NewClient) -> Result<Client, String> {
    state
        .client_repository
        .create_client(fields)
        .await
        .map_err(|e| e.to_string())
}

/// Updates the given fields of a client
pub async fn update_client(
    state: &AppState,
    id: &str,
    update: ClientUpdate,
) -> Result<Option<Client>, String> {
    state
        .client_repository
        .update_client(id, update)
        .await
        .map_err(|e| e.to_string())
}

/// Changes only the status of a client
pub async fn set_client_status(
    state: &AppState,
    id: &str,
    status: ClientStatus,
) -> Result<Option<Client>, String> {
    update_client(state, id, ClientUpdate::status(status)).await
}

/// Deletes a client after confirmation. Reports `true` whether or not the
/// client existed.
pub async fn delete_client(state: &AppState, id: &str) -> Result<bool, String> {
    let mut view = ViewState::new();
    state.client_usecase.request_delete(&mut view, id);
    state
        .client_usecase
        .confirm_delete(&mut view)
        .await
        .map_err(|e| e.to_string())?;
    Ok(true)
}
