//! Inbox crate - mailbox search for the Corredor CRM
//!
//! This crate provides the mailbox list behind the CRM's embedded email
//! client:
//! - Domain models (Thread, Message, EmailAddress)
//! - A Gmail-style search language (tokenizer, parser, evaluator)
//! - Folder buckets for browsing without a search
//! - Autocomplete suggestions and active filter chips
//! - A session-local read overlay and result pagination
//! - Thread store abstractions (in-memory, JSON snapshot)
//!
//! It has no UI dependencies; a front-end drives an [`InboxSession`].

pub mod error;
pub mod folder;
pub mod models;
pub mod query;
pub mod search;
pub mod session;
pub mod settings;
pub mod storage;

pub use error::StoreError;
pub use folder::{Folder, classify};
pub use models::{EmailAddress, Message, MessageId, Thread, ThreadId};
pub use query::{ThreadSummary, filter_threads};
pub use search::{
    CATALOG, DateBound, FilterChip, FolderFilter, OperatorSuggestion, ParsedQuery, Suggestion,
    active_chips, apply_suggestion, matches, parse, parse_query, suggestions, tokenize,
};
pub use session::{InboxSession, ReadOverlay, page_count, paginate};
pub use settings::InboxSettings;
pub use storage::{InMemoryThreadStore, JsonFileThreadStore, ThreadStore};
