//! Explicit view state of the interaction layer.
//!
//! Everything a front end needs to remember between two requests lives in
//! [`ViewState`]; it is passed through the flows instead of being held in
//! globals, so page transitions can be tested in isolation.

use serde::{Deserialize, Serialize};

/// The page currently shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "camelCase")]
pub enum Page {
    #[default]
    ClientsList,
    NewClient,
    #[serde(rename_all = "camelCase")]
    Client { client_id: String },
}

/// What should happen when the user asks to go back to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Nothing is pending; go straight to the list.
    Navigate,
    /// There are unsaved edits; ask save / don't save / cancel.
    PromptSave,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewState {
    pub page: Page,
    pub search_query: String,
    pub editing_admin: bool,
    pub editing_request: bool,
    pub editing_session_id: Option<String>,
    pub new_session_mode: bool,
    /// Set by input on the new-client form.
    pub has_unsaved_changes: bool,
    /// Client awaiting delete confirmation.
    pub pending_delete: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The client shown on the detail page, if any.
    pub fn current_client_id(&self) -> Option<&str> {
        match &self.page {
            Page::Client { client_id } => Some(client_id),
            _ => None,
        }
    }

    /// Switches page. Entering the new-client form starts with a clean form;
    /// entering a client page resets every edit mode.
    pub fn navigate_to(&mut self, page: Page) {
        match &page {
            Page::NewClient => self.has_unsaved_changes = false,
            Page::Client { .. } => self.reset_edit_modes(),
            Page::ClientsList => {}
        }
        self.page = page;
    }

    pub fn open_client(&mut self, client_id: impl Into<String>) {
        self.navigate_to(Page::Client {
            client_id: client_id.into(),
        });
    }

    pub fn back_to_list(&mut self) {
        self.reset_edit_modes();
        self.navigate_to(Page::ClientsList);
    }

    fn reset_edit_modes(&mut self) {
        self.editing_admin = false;
        self.editing_request = false;
        self.editing_session_id = None;
        self.new_session_mode = false;
        self.has_unsaved_changes = false;
    }

    pub fn begin_admin_edit(&mut self) {
        self.editing_admin = true;
    }

    pub fn end_admin_edit(&mut self) {
        self.editing_admin = false;
    }

    pub fn begin_request_edit(&mut self) {
        self.editing_request = true;
    }

    pub fn end_request_edit(&mut self) {
        self.editing_request = false;
    }

    pub fn begin_new_session(&mut self) {
        self.new_session_mode = true;
    }

    pub fn end_new_session(&mut self) {
        self.new_session_mode = false;
    }

    pub fn begin_session_edit(&mut self, session_id: impl Into<String>) {
        self.editing_session_id = Some(session_id.into());
    }

    pub fn end_session_edit(&mut self) {
        self.editing_session_id = None;
    }

    pub fn mark_form_dirty(&mut self) {
        self.has_unsaved_changes = true;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }

    /// True while any block or session on the client page is open for edit.
    pub fn is_editing(&self) -> bool {
        self.editing_admin
            || self.editing_request
            || self.new_session_mode
            || self.editing_session_id.is_some()
    }

    /// Decides whether leaving the current page needs the unsaved-changes
    /// prompt.
    pub fn leave_page(&self) -> LeaveOutcome {
        let pending = match self.page {
            Page::ClientsList => false,
            Page::NewClient => self.has_unsaved_changes,
            Page::Client { .. } => self.is_editing(),
        };
        if pending {
            LeaveOutcome::PromptSave
        } else {
            LeaveOutcome::Navigate
        }
    }

    pub fn request_delete(&mut self, client_id: impl Into<String>) {
        self.pending_delete = Some(client_id.into());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Consumes the pending confirmation.
    pub fn take_pending_delete(&mut self) -> Option<String> {
        self.pending_delete.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_list_page() {
        let state = ViewState::new();
        assert_eq!(state.page, Page::ClientsList);
        assert_eq!(state.leave_page(), LeaveOutcome::Navigate);
        assert!(state.current_client_id().is_none());
    }

    #[test]
    fn test_new_client_form_prompts_only_when_dirty() {
        let mut state = ViewState::new();
        state.navigate_to(Page::NewClient);
        assert_eq!(state.leave_page(), LeaveOutcome::Navigate);

        state.mark_form_dirty();
        assert_eq!(state.leave_page(), LeaveOutcome::PromptSave);

        // Re-entering the form starts clean.
        state.navigate_to(Page::NewClient);
        assert!(!state.has_unsaved_changes);
    }

    #[test]
    fn test_client_page_prompts_while_editing() {
        let mut state = ViewState::new();
        state.open_client("c1");
        assert_eq!(state.current_client_id(), Some("c1"));
        assert_eq!(state.leave_page(), LeaveOutcome::Navigate);

        state.begin_session_edit("s1");
        assert_eq!(state.leave_page(), LeaveOutcome::PromptSave);
        state.end_session_edit();

        state.begin_request_edit();
        assert!(state.is_editing());
        state.end_request_edit();
        assert!(!state.is_editing());
    }

    #[test]
    fn test_opening_client_resets_edit_modes() {
        let mut state = ViewState::new();
        state.open_client("c1");
        state.begin_admin_edit();
        state.begin_new_session();

        state.open_client("c2");
        assert!(!state.editing_admin);
        assert!(!state.new_session_mode);
        assert_eq!(state.current_client_id(), Some("c2"));
    }

    #[test]
    fn test_delete_confirmation_is_consumed() {
        let mut state = ViewState::new();
        state.request_delete("c1");
        assert_eq!(state.take_pending_delete().as_deref(), Some("c1"));
        assert!(state.take_pending_delete().is_none());

        state.request_delete("c2");
        state.cancel_delete();
        assert!(state.pending_delete.is_none());
    }

    #[test]
    fn test_view_state_serializes() {
        let mut state = ViewState::new();
        state.open_client("c1");
        state.set_search("ivan");

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["page"]["page"], "client");
        assert_eq!(json["page"]["clientId"], "c1");
        assert_eq!(json["searchQuery"], "ivan");

        let back: ViewState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
