//! Thread listing for the mailbox view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::folder::{Folder, classify};
use crate::models::{Thread, ThreadId, label};
use crate::search::{ParsedQuery, matches};
use crate::session::ReadOverlay;

/// Summary information for displaying a thread in a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub id: ThreadId,
    pub subject: String,
    /// Snippet of the latest message
    pub snippet: String,
    pub last_message_at: Option<DateTime<Utc>>,
    pub message_count: usize,
    /// Unread messages per the server flags
    pub unread_messages: usize,
    /// Display name of the latest sender
    pub sender_name: Option<String>,
    /// Email address of the latest sender
    pub sender_email: String,
    /// Sender as shown in the list: name, else address
    pub sender_display: String,
    /// Unread as shown in the list, overlay applied
    pub is_unread: bool,
    pub is_starred: bool,
    /// Primary folder bucket
    pub folder: Folder,
    pub contact_id: Option<String>,
}

impl ThreadSummary {
    pub fn new(thread: &Thread, overlay: &ReadOverlay) -> Self {
        let latest = thread.latest_message();
        let sender = latest.map(|m| m.sender());

        Self {
            id: thread.id.clone(),
            subject: thread.subject.clone(),
            snippet: latest.map(|m| m.snippet.clone()).unwrap_or_default(),
            last_message_at: thread.last_message_at(),
            message_count: thread.messages.len(),
            unread_messages: thread.unread_message_count(),
            sender_name: sender.as_ref().and_then(|s| s.name.clone()),
            sender_display: sender
                .as_ref()
                .map(|s| s.display_name().to_string())
                .unwrap_or_default(),
            sender_email: sender.map(|s| s.email).unwrap_or_default(),
            is_unread: !overlay.is_read(&thread.id) && thread.has_unread_messages(),
            is_starred: thread.has_label(label::STARRED),
            folder: classify(thread),
            contact_id: thread.contact_id.clone(),
        }
    }
}

/// Whether raw search input puts the view in global-search mode
///
/// Whitespace-only input counts as no search.
pub fn is_search_active(search_text: &str) -> bool {
    !search_text.trim().is_empty()
}

/// Threads to display, newest first
///
/// With a search active every thread is a candidate, whatever folder is
/// selected. Without one, the folder tab gates the candidates instead.
/// Either way the query is evaluated with the read overlay. Threads without
/// a known date sort last; ties keep snapshot order.
pub fn filter_threads<'a>(
    threads: &'a [Thread],
    search_text: &str,
    query: &ParsedQuery,
    folder: Folder,
    overlay: &ReadOverlay,
) -> Vec<&'a Thread> {
    let searching = is_search_active(search_text);

    let mut visible: Vec<&Thread> = threads
        .iter()
        .filter(|t| searching || folder.admits(t))
        .filter(|t| matches(t, query, overlay))
        .collect();

    visible.sort_by(|a, b| b.last_message_at().cmp(&a.last_message_at()));
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Message;
    use crate::search::parse_query;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, d, 9, 0, 0).unwrap()
    }

    fn setup_threads() -> Vec<Thread> {
        vec![
            Thread::new("t1", "Visita casa Maipú")
                .with_labels(&["INBOX"])
                .with_contact("c-17")
                .with_message(
                    Message::builder("m1")
                        .from("Ana <ana@x.cl>")
                        .received_at(day(1))
                        .build(),
                ),
            Thread::new("t2", "Contrato arriendo")
                .with_labels(&["SENT"])
                .with_message(Message::builder("m2").read(true).received_at(day(3)).build()),
            Thread::new("t3", "Casa en la playa")
                .with_labels(&["INBOX", "STARRED"])
                .with_message(Message::builder("m3").received_at(day(2)).build()),
            Thread::new("t4", "Sin mensajes").with_labels(&["INBOX"]),
        ]
    }

    fn ids(threads: &[&Thread]) -> Vec<String> {
        threads.iter().map(|t| t.id.0.clone()).collect()
    }

    #[test]
    fn test_browse_mode_gates_by_folder() {
        let threads = setup_threads();
        let empty = parse_query("");
        let overlay = ReadOverlay::new();

        let inbox = filter_threads(&threads, "", &empty, Folder::Inbox, &overlay);
        assert_eq!(ids(&inbox), vec!["t3", "t1", "t4"]);

        let archived = filter_threads(&threads, "", &empty, Folder::Archived, &overlay);
        assert_eq!(ids(&archived), vec!["t2"]);
    }

    #[test]
    fn test_search_mode_ignores_folder() {
        let threads = setup_threads();
        let overlay = ReadOverlay::new();
        let query = parse_query("casa");

        let found = filter_threads(&threads, "casa", &query, Folder::Archived, &overlay);
        assert_eq!(ids(&found), vec!["t3", "t1"]);
    }

    #[test]
    fn test_whitespace_search_is_browse_mode() {
        let threads = setup_threads();
        let overlay = ReadOverlay::new();
        let found = filter_threads(&threads, "   ", &parse_query("   "), Folder::Sent, &overlay);
        assert_eq!(ids(&found), vec!["t2"]);
    }

    #[test]
    fn test_summary_fields() {
        let threads = setup_threads();
        let mut overlay = ReadOverlay::new();

        let summary = ThreadSummary::new(&threads[0], &overlay);
        assert_eq!(summary.sender_name.as_deref(), Some("Ana"));
        assert_eq!(summary.sender_email, "ana@x.cl");
        assert_eq!(summary.sender_display, "Ana");
        assert_eq!(summary.contact_id.as_deref(), Some("c-17"));
        assert!(summary.is_unread);
        assert_eq!(summary.unread_messages, 1);
        assert_eq!(summary.folder, Folder::Inbox);

        overlay.mark_read(ThreadId::new("t1"));
        let summary = ThreadSummary::new(&threads[0], &overlay);
        assert!(!summary.is_unread);
        // Counts stay literal
        assert_eq!(summary.unread_messages, 1);
    }

    #[test]
    fn test_summary_for_empty_thread() {
        let threads = setup_threads();
        let summary = ThreadSummary::new(&threads[3], &ReadOverlay::new());
        assert!(summary.last_message_at.is_none());
        assert!(summary.sender_email.is_empty());
        assert!(summary.sender_display.is_empty());
        assert!(summary.contact_id.is_none());
        assert!(!summary.is_unread);
    }
}
