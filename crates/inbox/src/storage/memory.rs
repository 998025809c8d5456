//! In-memory thread store
//!
//! Used in tests and demos in place of the remote data service.

use anyhow::Result;
use log::debug;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use super::ThreadStore;
use super::traits::set_read_flags;
use crate::error::StoreError;
use crate::models::{MessageId, Thread, ThreadId, label};

/// In-memory implementation of ThreadStore, keyed by owner
#[derive(Default)]
pub struct InMemoryThreadStore {
    threads: RwLock<HashMap<String, Vec<Thread>>>,
    /// When set, every operation fails with `StoreError::Unavailable`
    unavailable: AtomicBool,
}

impl InMemoryThreadStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a thread for an owner
    pub fn upsert_thread(&self, owner_id: &str, thread: Thread) {
        let mut threads = self.threads.write().unwrap();
        let owned = threads.entry(owner_id.to_string()).or_default();
        match owned.iter_mut().find(|t| t.id == thread.id) {
            Some(existing) => *existing = thread,
            None => owned.push(thread),
        }
    }

    /// Simulate the backend going away (or coming back)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable.into());
        }
        Ok(())
    }

    fn with_thread<F>(&self, id: &ThreadId, f: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Thread>, usize),
    {
        self.check_available()?;
        let mut threads = self.threads.write().unwrap();
        for owned in threads.values_mut() {
            if let Some(pos) = owned.iter().position(|t| &t.id == id) {
                f(owned, pos);
                return Ok(());
            }
        }
        Err(StoreError::ThreadNotFound(id.clone()).into())
    }
}

impl ThreadStore for InMemoryThreadStore {
    fn fetch_threads(&self, owner_id: &str) -> Result<Vec<Thread>> {
        self.check_available()?;
        let threads = self.threads.read().unwrap();
        Ok(threads.get(owner_id).cloned().unwrap_or_default())
    }

    fn update_message_read_flags(&self, message_ids: &[MessageId], is_read: bool) -> Result<()> {
        self.check_available()?;
        let mut threads = self.threads.write().unwrap();
        let changed: usize = threads
            .values_mut()
            .map(|owned| set_read_flags(owned, message_ids, is_read))
            .sum();
        debug!("Set is_read={} on {} messages", is_read, changed);
        Ok(())
    }

    fn delete_thread(&self, id: &ThreadId) -> Result<()> {
        self.with_thread(id, |owned, pos| {
            owned.remove(pos);
        })
    }

    fn archive_thread(&self, id: &ThreadId) -> Result<()> {
        self.with_thread(id, |owned, pos| {
            owned[pos].labels.retain(|l| l != label::INBOX);
        })
    }
}
