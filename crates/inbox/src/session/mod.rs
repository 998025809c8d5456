//! Mailbox session state
//!
//! Everything the mailbox view owns between keystrokes: the current search
//! and folder, the page index, the read overlay, and the last good thread
//! snapshot.

mod inbox;
mod overlay;
mod pagination;
mod timing;

pub use inbox::InboxSession;
pub use overlay::ReadOverlay;
pub use pagination::{page_count, paginate};
pub use timing::refresh_due;
