//! Mailbox folder buckets used when browsing without a search

use serde::{Deserialize, Serialize};

use crate::models::{Thread, label};

/// A folder tab in the mailbox sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Folder {
    #[default]
    Inbox,
    Starred,
    Sent,
    Drafts,
    Trashed,
    Archived,
}

impl Folder {
    /// All folders in sidebar order
    pub const ALL: [Folder; 6] = [
        Folder::Inbox,
        Folder::Starred,
        Folder::Sent,
        Folder::Drafts,
        Folder::Trashed,
        Folder::Archived,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Folder::Inbox => "inbox",
            Folder::Starred => "starred",
            Folder::Sent => "sent",
            Folder::Drafts => "drafts",
            Folder::Trashed => "trashed",
            Folder::Archived => "archived",
        }
    }

    pub fn from_id(id: &str) -> Option<Folder> {
        Folder::ALL.into_iter().find(|f| f.id() == id)
    }

    /// Whether a thread shows up under this tab
    pub fn admits(self, thread: &Thread) -> bool {
        match self {
            Folder::Inbox => thread.has_label(label::INBOX),
            Folder::Starred => thread.has_label(label::STARRED),
            Folder::Sent => thread.has_label(label::SENT),
            Folder::Drafts => thread.has_label(label::DRAFT),
            Folder::Trashed => thread.has_label(label::TRASH),
            Folder::Archived => {
                !thread.has_label(label::INBOX)
                    && !thread.has_label(label::TRASH)
                    && !thread.has_label(label::DRAFT)
            }
        }
    }
}

impl std::fmt::Display for Folder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// The primary bucket of a thread
///
/// A thread can show under several tabs (a starred inbox thread is in both),
/// so this picks the first admitting folder in [`Folder::ALL`] order. Total:
/// a thread with no recognized labels lands in `Archived`.
pub fn classify(thread: &Thread) -> Folder {
    Folder::ALL
        .into_iter()
        .find(|folder| folder.admits(thread))
        .unwrap_or(Folder::Archived)
}
