//! Well-known mail provider labels
//!
//! Labels are an open vocabulary: anything the provider attaches to a thread
//! ends up in `Thread::labels`. Only these system labels carry meaning for
//! folder bucketing and the `in:` / `is:starred` operators.

pub const INBOX: &str = "INBOX";
pub const SENT: &str = "SENT";
pub const STARRED: &str = "STARRED";
pub const TRASH: &str = "TRASH";
pub const DRAFT: &str = "DRAFT";
pub const SPAM: &str = "SPAM";

/// Human-readable (Spanish) name for a label, used by filter chips
pub fn label_display_name(label: &str) -> String {
    match label {
        INBOX => "recibidos".to_string(),
        SENT => "enviados".to_string(),
        STARRED => "destacados".to_string(),
        TRASH => "papelera".to_string(),
        DRAFT => "borradores".to_string(),
        SPAM => "spam".to_string(),
        other => other.to_lowercase(),
    }
}
