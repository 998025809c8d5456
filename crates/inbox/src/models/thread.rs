//! Thread model representing a conversation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::Message;

/// Unique identifier for a thread
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadId(pub String);

impl ThreadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ThreadId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ThreadId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A thread is a conversation holding one or more messages
///
/// Read-only to the inbox: snapshots come from the thread store and are
/// replaced wholesale on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    /// Subject line, may be empty
    #[serde(default)]
    pub subject: String,
    /// Provider labels (INBOX, STARRED, custom...). A `null` from the
    /// backend is read as no labels.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub labels: Vec<String>,
    /// Messages in sync order
    #[serde(default)]
    pub messages: Vec<Message>,
    /// CRM contact this conversation is linked to
    #[serde(default)]
    pub contact_id: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Thread {
    pub fn new(id: impl Into<ThreadId>, subject: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            labels: Vec::new(),
            messages: Vec::new(),
            contact_id: None,
        }
    }

    pub fn with_labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_contact(mut self, contact_id: impl Into<String>) -> Self {
        self.contact_id = Some(contact_id.into());
        self
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// The most recent message by `received_at`
    ///
    /// Undated messages rank below dated ones. When several share the
    /// newest timestamp, the one appearing last in `messages` wins.
    pub fn latest_message(&self) -> Option<&Message> {
        // max_by_key keeps the last of equal maxima
        self.messages.iter().max_by_key(|m| m.received_at)
    }

    /// Timestamp of the latest message, if known
    pub fn last_message_at(&self) -> Option<DateTime<Utc>> {
        self.latest_message().and_then(|m| m.received_at)
    }

    /// Whether any message is unread according to the server flags
    pub fn has_unread_messages(&self) -> bool {
        self.messages.iter().any(|m| !m.is_read)
    }

    /// Number of unread messages according to the server flags
    pub fn unread_message_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_read).count()
    }

    pub fn has_attachments(&self) -> bool {
        self.messages.iter().any(|m| m.attachment_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_latest_message_by_timestamp() {
        let thread = Thread::new("t1", "Visita")
            .with_message(Message::builder("m1").received_at(at(9)).build())
            .with_message(Message::builder("m2").received_at(at(14)).build())
            .with_message(Message::builder("m3").received_at(at(11)).build());

        assert_eq!(thread.latest_message().unwrap().id.as_str(), "m2");
        assert_eq!(thread.last_message_at(), Some(at(14)));
    }

    #[test]
    fn test_latest_message_tie_prefers_last() {
        let thread = Thread::new("t1", "Visita")
            .with_message(Message::builder("m1").received_at(at(9)).build())
            .with_message(Message::builder("m2").received_at(at(9)).build());

        assert_eq!(thread.latest_message().unwrap().id.as_str(), "m2");
    }

    #[test]
    fn test_undated_messages_rank_lowest() {
        let thread = Thread::new("t1", "Visita")
            .with_message(Message::builder("m1").received_at(at(9)).build())
            .with_message(Message::builder("m2").build());

        assert_eq!(thread.latest_message().unwrap().id.as_str(), "m1");
    }

    #[test]
    fn test_empty_thread_has_no_latest() {
        let thread = Thread::new("t1", "");
        assert!(thread.latest_message().is_none());
        assert!(thread.last_message_at().is_none());
        assert!(!thread.has_unread_messages());
    }

    #[test]
    fn test_unread_counts_are_literal() {
        let thread = Thread::new("t1", "Oferta")
            .with_message(Message::builder("m1").read(true).build())
            .with_message(Message::builder("m2").build())
            .with_message(Message::builder("m3").build());

        assert!(thread.has_unread_messages());
        assert_eq!(thread.unread_message_count(), 2);
    }

    #[test]
    fn test_null_labels_deserialize_as_empty() {
        let thread: Thread =
            serde_json::from_str(r#"{"id": "t1", "subject": "x", "labels": null}"#).unwrap();
        assert!(thread.labels.is_empty());

        let thread: Thread = serde_json::from_str(r#"{"id": "t2"}"#).unwrap();
        assert!(thread.labels.is_empty());
        assert!(thread.messages.is_empty());
    }
}
