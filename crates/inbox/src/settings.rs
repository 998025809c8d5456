//! Inbox settings
//!
//! Loaded from `inbox.json` in the Corredor config directory. Every field
//! has a default, so a missing file or a partial one is fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings filename in the Corredor config directory
pub const SETTINGS_FILE: &str = "inbox.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxSettings {
    /// Threads per result page
    pub page_size: usize,
    /// Seconds between background refreshes of the thread list
    pub poll_interval_secs: u64,
    /// CRM user whose threads are fetched
    pub owner_id: String,
}

impl Default for InboxSettings {
    fn default() -> Self {
        Self {
            page_size: 20,
            poll_interval_secs: 30,
            owner_id: String::new(),
        }
    }
}

impl InboxSettings {
    /// Load from the config directory, defaults if the file is absent
    pub fn load() -> Result<Self> {
        config::load_json_or_default(SETTINGS_FILE)
    }

    /// Load from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse inbox settings JSON")
    }

    /// Page size with zero treated as one
    pub fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = InboxSettings::default();
        assert_eq!(settings.page_size, 20);
        assert_eq!(settings.poll_interval_secs, 30);
        assert!(settings.owner_id.is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = InboxSettings::from_json(r#"{ "owner_id": "ana" }"#).unwrap();
        assert_eq!(settings.owner_id, "ana");
        assert_eq!(settings.page_size, 20);
    }

    #[test]
    fn test_invalid_json() {
        assert!(InboxSettings::from_json(r#"{ "page_size": "veinte" }"#).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "page_size": 0, "poll_interval_secs": 5 }"#).unwrap();

        let settings = InboxSettings::from_file(&path).unwrap();
        assert_eq!(settings.poll_interval_secs, 5);
        assert_eq!(settings.effective_page_size(), 1);
    }
}
