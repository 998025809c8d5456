//! Query evaluation against a single thread

use chrono::{DateTime, Utc};

use super::query_parser::{DateBound, FolderFilter, ParsedQuery};
use crate::models::{Thread, label};
use crate::session::ReadOverlay;

/// Per-thread facts a query is checked against
///
/// Text fields are lowercased. Message-derived fields come from the latest
/// message and are empty when the thread has none.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadFacts {
    pub from_addr: String,
    pub to_addr: String,
    pub subject: String,
    pub snippet: String,
    /// Server flags, overridden to `false` by the read overlay
    pub is_unread: bool,
    pub date: Option<DateTime<Utc>>,
}

impl ThreadFacts {
    pub fn derive(thread: &Thread, overlay: &ReadOverlay) -> Self {
        let latest = thread.latest_message();
        let lower = |s: Option<&str>| s.unwrap_or_default().to_lowercase();

        Self {
            from_addr: lower(latest.map(|m| m.from_address.as_str())),
            to_addr: lower(latest.map(|m| m.to_address.as_str())),
            subject: thread.subject.to_lowercase(),
            snippet: lower(latest.map(|m| m.snippet.as_str())),
            is_unread: !overlay.is_read(&thread.id) && thread.has_unread_messages(),
            date: latest.and_then(|m| m.received_at),
        }
    }

    /// A free-text term matches the subject, sender, or snippet
    fn contains_text(&self, term: &str) -> bool {
        self.subject.contains(term) || self.from_addr.contains(term) || self.snippet.contains(term)
    }
}

/// Whether `thread` satisfies every filter present in `query`
///
/// Absent filters always pass, so an empty query matches everything.
pub fn matches(thread: &Thread, query: &ParsedQuery, overlay: &ReadOverlay) -> bool {
    if query.is_empty() {
        return true;
    }

    let facts = ThreadFacts::derive(thread, overlay);

    if let Some(from) = &query.from
        && !facts.from_addr.contains(from.as_str())
    {
        return false;
    }

    if let Some(to) = &query.to
        && !facts.to_addr.contains(to.as_str())
    {
        return false;
    }

    if let Some(subject) = &query.subject
        && !facts.subject.contains(subject.as_str())
    {
        return false;
    }

    if let Some(is_unread) = query.is_unread
        && is_unread != facts.is_unread
    {
        return false;
    }

    if query.is_starred && !thread.has_label(label::STARRED) {
        return false;
    }

    if query.has_attachment && !thread.has_attachments() {
        return false;
    }

    // Undated threads pass both bounds; so does an unparseable bound
    if let (Some(DateBound::Date(after)), Some(date)) = (&query.after, facts.date)
        && date < *after
    {
        return false;
    }

    if let (Some(DateBound::Date(before)), Some(date)) = (&query.before, facts.date)
        && date > *before
    {
        return false;
    }

    match &query.in_folder {
        FolderFilter::Unset => {}
        FolderFilter::Archive => {
            if thread.has_label(label::INBOX) || thread.has_label(label::TRASH) {
                return false;
            }
        }
        FolderFilter::Named(name) => {
            if !thread.has_label(name) {
                return false;
            }
        }
    }

    query.text.iter().all(|term| facts.contains_text(term))
}
