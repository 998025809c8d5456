//! Thread store backed by a JSON snapshot file
//!
//! The file holds a JSON array of threads exported for a single CRM user,
//! so `owner_id` is not used to filter. Every fetch re-reads the file;
//! mutations rewrite it in place.

use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::ThreadStore;
use super::traits::set_read_flags;
use crate::error::StoreError;
use crate::models::{MessageId, Thread, ThreadId, label};

pub struct JsonFileThreadStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonFileThreadStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a fresh snapshot, replacing whatever the file held
    pub fn save(&self, threads: &[Thread]) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        self.write(threads)
    }

    fn read(&self) -> Result<Vec<Thread>, StoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Snapshot {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, threads: &[Thread]) -> Result<()> {
        let content = serde_json::to_string_pretty(threads)?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<Thread>) -> Result<()>,
    {
        let _guard = self.write_lock.lock().unwrap();
        let mut threads = self.read()?;
        f(&mut threads)?;
        self.write(&threads)
    }
}

impl ThreadStore for JsonFileThreadStore {
    fn fetch_threads(&self, _owner_id: &str) -> Result<Vec<Thread>> {
        let threads = self.read()?;
        debug!("Read {} threads from {}", threads.len(), self.path.display());
        Ok(threads)
    }

    fn update_message_read_flags(&self, message_ids: &[MessageId], is_read: bool) -> Result<()> {
        self.modify(|threads| {
            set_read_flags(threads, message_ids, is_read);
            Ok(())
        })
    }

    fn delete_thread(&self, id: &ThreadId) -> Result<()> {
        self.modify(|threads| {
            let before = threads.len();
            threads.retain(|t| &t.id != id);
            if threads.len() == before {
                return Err(StoreError::ThreadNotFound(id.clone()).into());
            }
            Ok(())
        })
    }

    fn archive_thread(&self, id: &ThreadId) -> Result<()> {
        self.modify(|threads| {
            let thread = threads
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or_else(|| StoreError::ThreadNotFound(id.clone()))?;
            thread.labels.retain(|l| l != label::INBOX);
            Ok(())
        })
    }
}
