//! Client domain model.
//!
//! A `Client` is one person under care; a `Session` is a dated note that
//! exists only inside the client that owns it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RosterError;

/// Lifecycle status of a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    /// Currently seeing the practitioner.
    #[default]
    Active,
    /// Temporarily not attending.
    Pause,
    /// Work finished; kept for records.
    Archive,
}

impl ClientStatus {
    /// The persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pause => "pause",
            Self::Archive => "archive",
        }
    }

    /// Human readable label shown in lists and on the status picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pause => "Paused",
            Self::Archive => "Archived",
        }
    }

    /// Resolves a raw stored value, falling back to the default for anything
    /// unrecognised or missing.
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "pause" => Ok(Self::Pause),
            "archive" => Ok(Self::Archive),
            other => Err(RosterError::invalid_input(format!(
                "unknown client status '{}' (expected active, pause or archive)",
                other
            ))),
        }
    }
}

/// Format of the work done with a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Therapy {
    #[default]
    Personal,
    Group,
    Supervision,
}

impl Therapy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Group => "group",
            Self::Supervision => "supervision",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Group => "Group",
            Self::Supervision => "Supervision",
        }
    }

    /// Same fallback rule as [`ClientStatus::from_stored`].
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Therapy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Therapy {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "group" => Ok(Self::Group),
            "supervision" => Ok(Self::Supervision),
            other => Err(RosterError::invalid_input(format!(
                "unknown therapy '{}' (expected personal, group or supervision)",
                other
            ))),
        }
    }
}

/// A dated note nested under exactly one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique within the owning client; never reused.
    pub id: String,
    /// RFC 3339 timestamp set at creation.
    pub date: String,
    pub notes: String,
}

/// A person managed by the practitioner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub phone: String,
    pub telegram: String,
    pub email: String,
    pub age: String,
    pub price: String,
    pub therapy: Therapy,
    /// The client's request / presenting problem.
    pub request: String,
    /// Previous therapy experience.
    pub experience: String,
    pub comment: String,
    pub status: ClientStatus,
    /// RFC 3339 timestamp set once at creation.
    pub created_at: String,
    /// Most recent first by construction.
    pub sessions: Vec<Session>,
}

impl Client {
    /// "Last First Middle", with missing parts dropped.
    pub fn display_name(&self) -> String {
        [&self.last_name, &self.first_name, &self.middle_name]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn find_session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == session_id)
    }
}

/// Fields supplied by the caller when a client is created.
///
/// Identity, creation time, status and sessions are stamped by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewClient {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub phone: String,
    pub telegram: String,
    pub email: String,
    pub age: String,
    pub price: String,
    pub therapy: Option<Therapy>,
    pub request: String,
    pub experience: String,
    pub comment: String,
}

impl NewClient {
    pub fn named(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            ..Self::default()
        }
    }
}

/// Partial update of a client.
///
/// Only the mutable fields are listed; `None` leaves the stored value as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientUpdate {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub phone: Option<String>,
    pub telegram: Option<String>,
    pub email: Option<String>,
    pub age: Option<String>,
    pub price: Option<String>,
    pub therapy: Option<Therapy>,
    pub request: Option<String>,
    pub experience: Option<String>,
    pub comment: Option<String>,
    pub status: Option<ClientStatus>,
}

impl ClientUpdate {
    /// A status-only change.
    pub fn status(status: ClientStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fields supplied when a session is appended to a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewSession {
    pub notes: Option<String>,
}

impl NewSession {
    pub fn with_notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
        }
    }
}

/// Partial update of a session; `id` and `date` are not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionUpdate {
    pub notes: Option<String>,
}

impl SessionUpdate {
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client() -> Client {
        Client {
            id: "c1".to_string(),
            last_name: "Ivanov".to_string(),
            first_name: "Petr".to_string(),
            middle_name: String::new(),
            phone: String::new(),
            telegram: String::new(),
            email: String::new(),
            age: String::new(),
            price: String::new(),
            therapy: Therapy::default(),
            request: String::new(),
            experience: String::new(),
            comment: String::new(),
            status: ClientStatus::default(),
            created_at: "2025-01-01T00:00:00.000Z".to_string(),
            sessions: vec![Session {
                id: "s1".to_string(),
                date: "2025-01-02T00:00:00.000Z".to_string(),
                notes: "first visit".to_string(),
            }],
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Archive".parse::<ClientStatus>().unwrap(), ClientStatus::Archive);
        assert!("retired".parse::<ClientStatus>().is_err());
        assert_eq!(ClientStatus::from_stored(Some("retired")), ClientStatus::Active);
        assert_eq!(ClientStatus::from_stored(None), ClientStatus::Active);
    }

    #[test]
    fn test_therapy_fallback() {
        assert_eq!(Therapy::from_stored(Some("group")), Therapy::Group);
        assert_eq!(Therapy::from_stored(Some("")), Therapy::Personal);
    }

    #[test]
    fn test_client_serializes_camel_case() {
        let value = serde_json::to_value(sample_client()).unwrap();
        assert_eq!(value["lastName"], "Ivanov");
        assert_eq!(value["createdAt"], "2025-01-01T00:00:00.000Z");
        assert_eq!(value["status"], "active");
        assert_eq!(value["therapy"], "personal");
        assert_eq!(value["sessions"][0]["notes"], "first visit");
    }

    #[test]
    fn test_display_name_skips_empty_parts() {
        let mut client = sample_client();
        assert_eq!(client.display_name(), "Ivanov Petr");
        client.middle_name = "Sergeevich".to_string();
        assert_eq!(client.display_name(), "Ivanov Petr Sergeevich");
    }

    #[test]
    fn test_find_session() {
        let client = sample_client();
        assert!(client.find_session("s1").is_some());
        assert!(client.find_session("missing").is_none());
    }

    #[test]
    fn test_update_from_partial_json() {
        let update: ClientUpdate = serde_json::from_str(r#"{"status":"pause"}"#).unwrap();
        assert_eq!(update, ClientUpdate::status(ClientStatus::Pause));
        assert!(!update.is_empty());
        assert!(ClientUpdate::default().is_empty());
    }
}
