//! Shared data types for the application.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Backend-assigned identifier of an entry.
///
/// Backends hand out either integer or string ids; both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Number(n) => write!(f, "{n}"),
            EntryId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for EntryId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => EntryId::Number(n),
            Err(_) => EntryId::Text(s.to_string()),
        })
    }
}

/// A single guestbook/board post as returned by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    /// Only the guestbook layout carries an author.
    #[serde(default)]
    pub author: Option<String>,
    pub content: String,
    /// Raw timestamp string, see [`crate::time::format_timestamp`].
    pub created_at: String,
}

impl Entry {
    /// Creation time rendered for display.
    pub fn display_created_at(&self) -> String {
        crate::time::format_timestamp(&self.created_at)
    }
}

/// Payload sent when creating an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub content: String,
}

/// Pending input fields of the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub author: String,
    pub content: String,
}

impl FormState {
    /// Reset both fields after a completed submit.
    pub fn clear(&mut self) {
        self.author.clear();
        self.content.clear();
    }
}

/// Body of the health endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthReport {
    /// Any JSON value; backends differ in what they put here.
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl HealthReport {
    /// Text to show for `message`, or `None` when it is null, false, zero or empty.
    pub fn display_message(&self) -> Option<String> {
        use serde_json::Value;

        match self.message.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

/// What the header shows about the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    /// No health response yet.
    Checking,
    /// Message reported by the health endpoint.
    Reported(String),
    /// The endpoint answered without a usable message.
    Unknown,
    /// The health check failed.
    ConnectionFailed,
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendStatus::Checking => f.write_str("checking..."),
            BackendStatus::Reported(message) => f.write_str(message),
            BackendStatus::Unknown => f.write_str("no information"),
            BackendStatus::ConnectionFailed => f.write_str("connection failed"),
        }
    }
}

/// Backend layout the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    /// `/entries`, entries carry an author, no delete or health.
    Guestbook,
    /// `/api/data` with delete and `/api/health`, content only.
    #[default]
    Board,
}

impl Schema {
    /// Whether new entries must name an author.
    pub fn requires_author(self) -> bool {
        matches!(self, Schema::Guestbook)
    }

    pub fn supports_delete(self) -> bool {
        matches!(self, Schema::Board)
    }

    pub fn supports_health(self) -> bool {
        matches!(self, Schema::Board)
    }

    /// Page title shown by the front-ends.
    pub fn title(self) -> &'static str {
        match self {
            Schema::Guestbook => "Guestbook",
            Schema::Board => "Simple Board",
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Guestbook => f.write_str("guestbook"),
            Schema::Board => f.write_str("board"),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown schema '{0}' (expected 'guestbook' or 'board')")]
pub struct ParseSchemaError(String);

impl FromStr for Schema {
    type Err = ParseSchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guestbook" => Ok(Schema::Guestbook),
            "board" => Ok(Schema::Board),
            _ => Err(ParseSchemaError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_accepts_numeric_id_without_author() {
        let json = r#"[{"id":1,"content":"hi","created_at":"2024-05-01T10:00:00+00:00"}]"#;
        let entries: Vec<Entry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, EntryId::Number(1));
        assert_eq!(entries[0].author, None);
        assert_eq!(entries[0].content, "hi");
    }

    #[test]
    fn entry_accepts_string_id_and_author() {
        let json = r#"{"id":"a1b2","author":"kim","content":"hello","created_at":"x"}"#;
        let entry: Entry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.id.to_string(), "a1b2");
        assert_eq!(entry.author.as_deref(), Some("kim"));
    }

    #[test]
    fn new_entry_omits_missing_author() {
        let body = NewEntry {
            author: None,
            content: "hi".into(),
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"content":"hi"}"#);

        let body = NewEntry {
            author: Some("lee".into()),
            content: "hi".into(),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"author":"lee","content":"hi"}"#
        );
    }

    #[test]
    fn entry_id_parses_numbers_first() {
        assert_eq!("42".parse::<EntryId>().unwrap(), EntryId::Number(42));
        assert_eq!(
            "abc".parse::<EntryId>().unwrap(),
            EntryId::Text("abc".into())
        );
    }

    #[test]
    fn schema_round_trips_through_str() {
        assert_eq!("Guestbook".parse::<Schema>().unwrap(), Schema::Guestbook);
        assert_eq!(" board ".parse::<Schema>().unwrap(), Schema::Board);
        assert!("wiki".parse::<Schema>().is_err());
        assert_eq!(Schema::Guestbook.to_string(), "guestbook");
    }

    #[test]
    fn health_message_accepts_any_json() {
        let report = |json: &str| serde_json::from_str::<HealthReport>(json).unwrap();

        assert_eq!(
            report(r#"{"message":"ip-10-0-0-1"}"#).display_message().as_deref(),
            Some("ip-10-0-0-1")
        );
        assert_eq!(report(r#"{"message":42}"#).display_message().as_deref(), Some("42"));
        assert_eq!(report(r#"{"message":true}"#).display_message().as_deref(), Some("true"));
        assert_eq!(report(r#"{"message":""}"#).display_message(), None);
        assert_eq!(report(r#"{"message":0}"#).display_message(), None);
        assert_eq!(report(r#"{"message":null}"#).display_message(), None);
        assert_eq!(report(r#"{"status":"ok"}"#).display_message(), None);
    }

    #[test]
    fn backend_status_strings_are_fixed() {
        assert_eq!(BackendStatus::ConnectionFailed.to_string(), "connection failed");
        assert_eq!(BackendStatus::Unknown.to_string(), "no information");
        assert_eq!(BackendStatus::Reported("ip-10-0-0-1".into()).to_string(), "ip-10-0-0-1");
    }
}
