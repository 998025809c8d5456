//! Session-local read state

use std::collections::HashSet;

use crate::models::ThreadId;

/// Threads the user has opened (or otherwise marked read) this session
///
/// Membership means "read", whatever the per-message server flags say. Only
/// explicit user actions change it; refreshing the thread list never does.
/// Nothing is persisted, so a new session starts empty.
#[derive(Debug, Clone, Default)]
pub struct ReadOverlay {
    read: HashSet<ThreadId>,
}

impl ReadOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the thread wasn't already marked read
    pub fn mark_read(&mut self, thread_id: ThreadId) -> bool {
        self.read.insert(thread_id)
    }

    /// Returns true if the thread was marked read before
    pub fn mark_unread(&mut self, thread_id: &ThreadId) -> bool {
        self.read.remove(thread_id)
    }

    pub fn is_read(&self, thread_id: &ThreadId) -> bool {
        self.read.contains(thread_id)
    }

    pub fn len(&self) -> usize {
        self.read.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_read_and_unread() {
        let mut overlay = ReadOverlay::new();
        let id = ThreadId::new("t1");

        assert!(!overlay.is_read(&id));
        assert!(overlay.mark_read(id.clone()));
        assert!(!overlay.mark_read(id.clone()));
        assert!(overlay.is_read(&id));
        assert_eq!(overlay.len(), 1);

        assert!(overlay.mark_unread(&id));
        assert!(!overlay.mark_unread(&id));
        assert!(overlay.is_empty());
    }
}
