//! Search, ordering and formatting rules of the client list and the
//! session feed.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::cmp::Reverse;

use crate::client::{Client, ClientStatus, Session};

const EMPTY_CELL: &str = "-";

/// One row of the client list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub status: ClientStatus,
    pub status_label: &'static str,
    pub therapy_label: &'static str,
    pub created: String,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            name: client.display_name(),
            phone: client.phone.clone(),
            status: client.status,
            status_label: client.status.label(),
            therapy_label: client.therapy.label(),
            created: format_date(&client.created_at),
        }
    }
}

/// Linear, case-insensitive substring match over names and contacts.
///
/// The fields are joined with single spaces before matching, so a query may
/// span them ("ivanov petr"). An empty (or whitespace-only) query matches
/// every client.
pub fn matches_query(client: &Client, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let haystack = [
        client.last_name.as_str(),
        client.first_name.as_str(),
        client.middle_name.as_str(),
        client.phone.as_str(),
        client.telegram.as_str(),
        client.email.as_str(),
    ]
    .join(" ")
    .to_lowercase();
    haystack.contains(&needle)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Filters by `query` and orders newest `created_at` first.
///
/// The sort is stable; clients whose timestamp cannot be parsed go last.
pub fn filter_and_sort(clients: Vec<Client>, query: &str) -> Vec<Client> {
    let mut filtered: Vec<Client> = clients
        .into_iter()
        .filter(|client| matches_query(client, query))
        .collect();
    filtered.sort_by_key(|client| Reverse(parse_timestamp(&client.created_at)));
    filtered
}

/// Newest first, stable for sessions sharing the same instant.
pub fn sessions_newest_first(sessions: &[Session]) -> Vec<Session> {
    let mut sorted = sessions.to_vec();
    sorted.sort_by_key(|session| Reverse(parse_timestamp(&session.date)));
    sorted
}

/// `dd.mm.yyyy` in local time, or `-` for an empty or unparsable timestamp.
pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.with_timezone(&Local).format("%d.%m.%Y").to_string(),
        None => EMPTY_CELL.to_string(),
    }
}
