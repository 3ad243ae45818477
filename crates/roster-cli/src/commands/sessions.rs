use roster_core::client::{NewSession, Session, SessionUpdate};

use crate::app::AppState;

/// Adds a session to a client; `None` when the client does not exist
pub async fn add_session(
    state: &AppState,
    client_id: &str,
    session: NewSession,
) -> Result<Option<Session>, String> {
    state
        .client_repository
        .add_session(client_id, session)
        .await
        .map_err(|e| e.to_string())
}

/// Updates a session of a client; `None` when either does not exist
pub async fn update_session(
    state: &AppState,
    client_id: &str,
    session_id: &str,
    update: SessionUpdate,
) -> Result<Option<Session>, String> {
    state
        .client_repository
        .update_session(client_id, session_id, update)
        .await
        .map_err(|e| e.to_string())
}
