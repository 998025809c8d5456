//! The mailbox session the UI drives

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::Arc;
use std::thread::JoinHandle;

use super::overlay::ReadOverlay;
use super::pagination::{page_count, paginate};
use super::timing::refresh_due;
use crate::folder::Folder;
use crate::models::{MessageId, Thread, ThreadId, label};
use crate::query::{ThreadSummary, filter_threads};
use crate::search::{
    CATALOG, FilterChip, ParsedQuery, Suggestion, active_chips, parse_query, suggestions,
};
use crate::settings::InboxSettings;
use crate::storage::ThreadStore;

/// Search, folder, paging and read state for one mailbox view
///
/// Owned by the UI thread; every setter recomputes synchronously. The thread
/// list is a snapshot replaced on refresh. A failed refresh keeps the old
/// one. Read/unread marks update the overlay immediately and write through
/// to the store on a background thread. A failed write is logged and never
/// rolled back.
pub struct InboxSession {
    store: Arc<dyn ThreadStore>,
    settings: InboxSettings,
    threads: Vec<Thread>,
    last_fetch_at: Option<DateTime<Utc>>,
    search_text: String,
    query: ParsedQuery,
    folder: Folder,
    page: usize,
    overlay: ReadOverlay,
    pending_writes: Vec<JoinHandle<()>>,
}

impl InboxSession {
    /// Create a session with an empty snapshot; call [`refresh`](Self::refresh) to load
    pub fn new(store: Arc<dyn ThreadStore>, settings: InboxSettings) -> Self {
        Self {
            store,
            settings,
            threads: Vec::new(),
            last_fetch_at: None,
            search_text: String::new(),
            query: ParsedQuery::default(),
            folder: Folder::default(),
            page: 0,
            overlay: ReadOverlay::new(),
            pending_writes: Vec::new(),
        }
    }

    // === State setters ===

    /// Update the raw search input. Resets to the first page if it changed.
    pub fn set_search_text(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        if raw == self.search_text {
            return;
        }
        self.query = parse_query(&raw);
        self.search_text = raw;
        self.page = 0;
    }

    /// Select a folder tab. Resets to the first page if it changed.
    pub fn set_folder(&mut self, folder: Folder) {
        if folder != self.folder {
            self.folder = folder;
            self.page = 0;
        }
    }

    /// Jump to a page. Not clamped: past the end shows nothing.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    // === Accessors ===

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn query(&self) -> &ParsedQuery {
        &self.query
    }

    pub fn folder(&self) -> Folder {
        self.folder
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn overlay(&self) -> &ReadOverlay {
        &self.overlay
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn settings(&self) -> &InboxSettings {
        &self.settings
    }

    // === Derived views ===

    fn filtered(&self) -> Vec<&Thread> {
        let visible = filter_threads(
            &self.threads,
            &self.search_text,
            &self.query,
            self.folder,
            &self.overlay,
        );
        debug!(
            "Query {:?} in {}: {} of {} threads",
            self.search_text,
            self.folder,
            visible.len(),
            self.threads.len()
        );
        visible
    }

    /// The current page of matching threads
    pub fn visible_threads(&self) -> Vec<ThreadSummary> {
        let filtered = self.filtered();
        paginate(&filtered, self.settings.effective_page_size(), self.page)
            .iter()
            .map(|t| ThreadSummary::new(t, &self.overlay))
            .collect()
    }

    /// Number of matching threads across all pages
    pub fn result_count(&self) -> usize {
        self.filtered().len()
    }

    pub fn page_count(&self) -> usize {
        page_count(self.result_count(), self.settings.effective_page_size())
    }

    pub fn active_chips(&self) -> Vec<FilterChip> {
        active_chips(&self.query)
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        suggestions(CATALOG, &self.search_text)
    }

    /// Threads in a folder with unread messages, by the server flags alone
    pub fn unread_count(&self, folder: Folder) -> usize {
        self.threads
            .iter()
            .filter(|t| folder.admits(t) && t.has_unread_messages())
            .count()
    }

    // === Read state ===

    /// Mark a thread read (e.g. on open)
    ///
    /// Writes `is_read = true` to its messages in the background.
    pub fn mark_read(&mut self, thread_id: &ThreadId) {
        info!("Marking thread {} as read", thread_id.as_str());
        self.overlay.mark_read(thread_id.clone());

        let ids = self.message_ids(thread_id);
        self.write_read_flags(ids, true);
    }

    /// Mark a thread unread again
    ///
    /// Writes `is_read = false` to its messages in the background.
    pub fn mark_unread(&mut self, thread_id: &ThreadId) {
        info!("Marking thread {} as unread", thread_id.as_str());
        self.overlay.mark_unread(thread_id);

        let ids = self.message_ids(thread_id);
        self.write_read_flags(ids, false);
    }

    /// Every message id of a thread
    ///
    /// The cached flags may predate an earlier write from this session, so
    /// the store decides which messages actually change.
    fn message_ids(&self, thread_id: &ThreadId) -> Vec<MessageId> {
        self.threads
            .iter()
            .find(|t| &t.id == thread_id)
            .map(|t| t.messages.iter().map(|m| m.id.clone()).collect())
            .unwrap_or_default()
    }

    fn write_read_flags(&mut self, ids: Vec<MessageId>, is_read: bool) {
        self.pending_writes.retain(|handle| !handle.is_finished());
        if ids.is_empty() {
            return;
        }

        let store = Arc::clone(&self.store);
        let spawned = std::thread::Builder::new()
            .name("read-flags".to_string())
            .spawn(move || {
                if let Err(e) = store.update_message_read_flags(&ids, is_read) {
                    warn!(
                        "Failed to persist is_read={} for {} messages: {:#}",
                        is_read,
                        ids.len(),
                        e
                    );
                }
            });

        match spawned {
            Ok(handle) => self.pending_writes.push(handle),
            Err(e) => warn!("Failed to start read-flag write: {}", e),
        }
    }

    /// Block until every read-flag write started so far has finished
    pub fn wait_for_writes(&mut self) {
        for handle in self.pending_writes.drain(..) {
            if handle.join().is_err() {
                warn!("Read-flag write thread panicked");
            }
        }
    }

    // === Snapshot ===

    /// Fetch the thread list from the store
    ///
    /// Returns whether the snapshot was replaced. On failure the previous
    /// snapshot stays in place.
    pub fn refresh(&mut self) -> bool {
        match self.store.fetch_threads(&self.settings.owner_id) {
            Ok(threads) => {
                info!("Fetched {} threads", threads.len());
                self.threads = threads;
                self.last_fetch_at = Some(Utc::now());
                true
            }
            Err(e) => {
                warn!(
                    "Thread fetch failed, keeping {} cached threads: {:#}",
                    self.threads.len(),
                    e
                );
                false
            }
        }
    }

    /// Refresh if the polling interval has elapsed since the last good fetch
    pub fn refresh_if_due(&mut self, now: DateTime<Utc>) -> bool {
        if refresh_due(self.last_fetch_at, self.settings.poll_interval_secs, now) {
            self.refresh()
        } else {
            false
        }
    }

    /// Install a snapshot fetched elsewhere
    pub fn replace_snapshot(&mut self, threads: Vec<Thread>) {
        self.threads = threads;
        self.last_fetch_at = Some(Utc::now());
    }

    // === Mutations ===

    /// Archive a thread in the store, then drop its INBOX label locally
    pub fn archive_thread(&mut self, thread_id: &ThreadId) -> Result<()> {
        info!("Archiving thread {}", thread_id.as_str());
        self.store.archive_thread(thread_id)?;

        if let Some(thread) = self.threads.iter_mut().find(|t| &t.id == thread_id) {
            thread.labels.retain(|l| l != label::INBOX);
        }
        Ok(())
    }

    /// Delete a thread in the store, then drop it from the snapshot
    pub fn delete_thread(&mut self, thread_id: &ThreadId) -> Result<()> {
        info!("Deleting thread {}", thread_id.as_str());
        self.store.delete_thread(thread_id)?;

        self.threads.retain(|t| &t.id != thread_id);
        Ok(())
    }
}
