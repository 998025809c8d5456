//! Error types for thread stores

use std::path::PathBuf;

use thiserror::Error;

use crate::models::ThreadId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Thread not found: {0}")]
    ThreadNotFound(ThreadId),

    #[error("Thread store unavailable")]
    Unavailable,

    #[error("Failed to access snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed snapshot {}: {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
