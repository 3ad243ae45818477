//! Persisted shape of the roster document.
//!
//! ```json
//! { "clients": [ { "id": "...", "lastName": "...", ..., "sessions": [ ... ] } ] }
//! ```
//!
//! Reading is lenient: text fields default to empty, `null` reads as empty,
//! numbers and booleans read as their text form, `status` and `therapy` stay
//! raw strings, `sessions` may be missing and unknown keys are carried
//! through untouched. Only the record a mutation targets is rewritten from
//! typed values.

use roster_core::client::{
    Client, ClientStatus, ClientUpdate, NewClient, Session, SessionUpdate, Therapy,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Reads any scalar as text. Arrays and objects read as empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Like [`lenient_string`], but `null` stays absent.
fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    })
}

/// Session record as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionDto {
    pub fn new(id: String, date: String, notes: String) -> Self {
        Self {
            id,
            date,
            notes,
            extra: Map::new(),
        }
    }

    pub fn apply(&mut self, update: SessionUpdate) {
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
    }
}

impl From<&SessionDto> for Session {
    fn from(dto: &SessionDto) -> Self {
        Session {
            id: dto.id.clone(),
            date: dto.date.clone(),
            notes: dto.notes.clone(),
        }
    }
}

/// Client record as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientDto {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub middle_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_string")]
    pub telegram: String,
    #[serde(deserialize_with = "lenient_string")]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub age: String,
    #[serde(deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_string")]
    pub therapy: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub request: String,
    #[serde(deserialize_with = "lenient_string")]
    pub experience: String,
    #[serde(deserialize_with = "lenient_string")]
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_opt_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sessions: Option<Vec<SessionDto>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClientDto {
    /// Builds a fresh record from creation fields and store-stamped values.
    pub fn create(id: String, created_at: String, fields: NewClient) -> Self {
        Self {
            id,
            last_name: fields.last_name,
            first_name: fields.first_name,
            middle_name: fields.middle_name,
            phone: fields.phone,
            telegram: fields.telegram,
            email: fields.email,
            age: fields.age,
            price: fields.price,
            therapy: Some(fields.therapy.unwrap_or_default().as_str().to_string()),
            request: fields.request,
            experience: fields.experience,
            comment: fields.comment,
            status: Some(ClientStatus::Active.as_str().to_string()),
            created_at,
            sessions: Some(Vec::new()),
            extra: Map::new(),
        }
    }

    /// Shallow merge over the allow-listed mutable fields.
    pub fn apply(&mut self, update: ClientUpdate) {
        let ClientUpdate {
            last_name,
            first_name,
            middle_name,
            phone,
            telegram,
            email,
            age,
            price,
            therapy,
            request,
            experience,
            comment,
            status,
        } = update;

        merge(&mut self.last_name, last_name);
        merge(&mut self.first_name, first_name);
        merge(&mut self.middle_name, middle_name);
        merge(&mut self.phone, phone);
        merge(&mut self.telegram, telegram);
        merge(&mut self.email, email);
        merge(&mut self.age, age);
        merge(&mut self.price, price);
        merge(&mut self.request, request);
        merge(&mut self.experience, experience);
        merge(&mut self.comment, comment);
        if let Some(therapy) = therapy {
            self.therapy = Some(therapy.as_str().to_string());
        }
        if let Some(status) = status {
            self.status = Some(status.as_str().to_string());
        }
    }

    /// The session list, created on first use.
    pub fn sessions_mut(&mut self) -> &mut Vec<SessionDto> {
        self.sessions.get_or_insert_with(Vec::new)
    }
}

fn merge(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl From<&ClientDto> for Client {
    fn from(dto: &ClientDto) -> Self {
        Client {
            id: dto.id.clone(),
            last_name: dto.last_name.clone(),
            first_name: dto.first_name.clone(),
            middle_name: dto.middle_name.clone(),
            phone: dto.phone.clone(),
            telegram: dto.telegram.clone(),
            email: dto.email.clone(),
            age: dto.age.clone(),
            price: dto.price.clone(),
            therapy: Therapy::from_stored(dto.therapy.as_deref()),
            request: dto.request.clone(),
            experience: dto.experience.clone(),
            comment: dto.comment.clone(),
            status: ClientStatus::from_stored(dto.status.as_deref()),
            created_at: dto.created_at.clone(),
            sessions: dto
                .sessions
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(Session::from)
                .collect(),
        }
    }
}

/// The root document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseDto {
    #[serde(default)]
    pub clients: Vec<ClientDto>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DatabaseDto {
    pub fn find(&self, id: &str) -> Option<&ClientDto> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut ClientDto> {
        self.clients.iter_mut().find(|c| c.id == id)
    }
}
