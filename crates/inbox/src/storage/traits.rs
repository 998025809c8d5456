//! Thread store trait definition

use crate::models::{MessageId, Thread, ThreadId};
use anyhow::Result;

/// The backend the inbox reads threads from and writes mutations to
///
/// Implementations must be shareable across threads: read-flag writes run
/// on a background thread while the session keeps reading.
pub trait ThreadStore: Send + Sync {
    /// All threads owned by a CRM user
    fn fetch_threads(&self, owner_id: &str) -> Result<Vec<Thread>>;

    /// Set `is_read` on the given messages
    fn update_message_read_flags(&self, message_ids: &[MessageId], is_read: bool) -> Result<()>;

    /// Remove a thread
    fn delete_thread(&self, id: &ThreadId) -> Result<()>;

    /// Archive a thread (drop its INBOX label)
    fn archive_thread(&self, id: &ThreadId) -> Result<()>;
}

/// Apply a read-flag update to matching messages, returning how many changed
pub(crate) fn set_read_flags(
    threads: &mut [Thread],
    message_ids: &[MessageId],
    is_read: bool,
) -> usize {
    let mut changed = 0;
    for message in threads.iter_mut().flat_map(|t| t.messages.iter_mut()) {
        if message.is_read != is_read && message_ids.contains(&message.id) {
            message.is_read = is_read;
            changed += 1;
        }
    }
    changed
}
