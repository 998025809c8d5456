//! Message model representing a single synced email

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An email address with optional display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Display name (e.g., "Juan Pérez")
    pub name: Option<String>,
    /// Email address (e.g., "juan@example.cl")
    pub email: String,
}

impl EmailAddress {
    /// Create a new email address with just the email
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    /// Parse an address from free text like `Juan Pérez <juan@example.cl>`
    ///
    /// Anything without a well-formed angle-bracket part is taken verbatim
    /// as the address.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();

        if let Some(angle_start) = s.rfind('<')
            && let Some(angle_end) = s.rfind('>')
            && angle_start < angle_end
        {
            let name = s[..angle_start].trim().trim_matches('"').trim();
            let email = s[angle_start + 1..angle_end].trim();
            return Self {
                name: if name.is_empty() {
                    None
                } else {
                    Some(name.to_string())
                },
                email: email.to_string(),
            };
        }

        Self {
            name: None,
            email: s.to_string(),
        }
    }

    /// Name if present, otherwise the address
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}

/// A single email message within a thread
///
/// Created and updated by the mail-sync collaborator. The inbox only ever
/// changes `is_read`, and only through the read-flag write-through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// Raw From header, may embed a display name
    #[serde(default)]
    pub from_address: String,
    /// Raw To header
    #[serde(default)]
    pub to_address: String,
    /// Plain text preview of the body
    #[serde(default)]
    pub snippet: String,
    /// When the message was received; unknown for some imported mail
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
    /// Server-persisted read flag
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub attachment_count: usize,
}

impl Message {
    /// Create a new message builder
    pub fn builder(id: impl Into<MessageId>) -> MessageBuilder {
        MessageBuilder::new(id.into())
    }

    /// Parsed sender address
    pub fn sender(&self) -> EmailAddress {
        EmailAddress::parse(&self.from_address)
    }
}

/// Builder for creating Message instances
pub struct MessageBuilder {
    id: MessageId,
    from_address: String,
    to_address: String,
    snippet: String,
    received_at: Option<DateTime<Utc>>,
    is_read: bool,
    attachment_count: usize,
}

impl MessageBuilder {
    fn new(id: MessageId) -> Self {
        Self {
            id,
            from_address: String::new(),
            to_address: String::new(),
            snippet: String::new(),
            received_at: None,
            is_read: false,
            attachment_count: 0,
        }
    }

    pub fn from(mut self, from_address: impl Into<String>) -> Self {
        self.from_address = from_address.into();
        self
    }

    pub fn to(mut self, to_address: impl Into<String>) -> Self {
        self.to_address = to_address.into();
        self
    }

    pub fn snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    pub fn received_at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = Some(received_at);
        self
    }

    pub fn read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    pub fn attachments(mut self, count: usize) -> Self {
        self.attachment_count = count;
        self
    }

    pub fn build(self) -> Message {
        Message {
            id: self.id,
            from_address: self.from_address,
            to_address: self.to_address,
            snippet: self.snippet,
            received_at: self.received_at,
            is_read: self.is_read,
            attachment_count: self.attachment_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_with_name() {
        let addr = EmailAddress::parse("Juan Pérez <juan@x.cl>");
        assert_eq!(addr.name, Some("Juan Pérez".to_string()));
        assert_eq!(addr.email, "juan@x.cl");
    }

    #[test]
    fn test_parse_email_with_quoted_name() {
        let addr = EmailAddress::parse("\"Inmobiliaria Sur\" <ventas@sur.cl>");
        assert_eq!(addr.name, Some("Inmobiliaria Sur".to_string()));
        assert_eq!(addr.email, "ventas@sur.cl");
    }

    #[test]
    fn test_parse_email_without_name() {
        let addr = EmailAddress::parse("juan@x.cl");
        assert_eq!(addr.name, None);
        assert_eq!(addr.display_name(), "juan@x.cl");
    }

    #[test]
    fn test_parse_email_with_angle_brackets_no_name() {
        let addr = EmailAddress::parse("<juan@x.cl>");
        assert_eq!(addr.name, None);
        assert_eq!(addr.email, "juan@x.cl");
    }

    #[test]
    fn test_builder_defaults() {
        let msg = Message::builder("m1").build();
        assert!(!msg.is_read);
        assert!(msg.received_at.is_none());
        assert_eq!(msg.attachment_count, 0);
    }

    #[test]
    fn test_deserialize_sparse_message() {
        let msg: Message = serde_json::from_str(r#"{"id": "m1"}"#).unwrap();
        assert_eq!(msg.id.as_str(), "m1");
        assert!(msg.from_address.is_empty());
        assert!(!msg.is_read);
    }
}
