//! Polling cooldown for thread list refreshes

use chrono::{DateTime, Utc};

/// Check if the polling interval has passed since the last successful fetch.
///
/// # Arguments
/// * `last_fetch_at` - When the last successful fetch completed (None if never fetched)
/// * `interval_secs` - Seconds between polls
/// * `now` - Current time
pub fn refresh_due(
    last_fetch_at: Option<DateTime<Utc>>,
    interval_secs: u64,
    now: DateTime<Utc>,
) -> bool {
    match last_fetch_at {
        Some(last) => {
            let elapsed = now - last;
            elapsed.num_seconds() >= interval_secs as i64
        }
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_refresh_due_never_fetched() {
        assert!(refresh_due(None, 30, Utc::now()));
        assert!(refresh_due(None, 0, Utc::now()));
    }

    #[test]
    fn test_refresh_not_due_within_interval() {
        let now = Utc::now();
        assert!(!refresh_due(Some(now - Duration::seconds(10)), 30, now));
        assert!(!refresh_due(Some(now - Duration::seconds(1)), 30, now));
    }

    #[test]
    fn test_refresh_due_after_interval() {
        let now = Utc::now();
        assert!(refresh_due(Some(now - Duration::seconds(60)), 30, now));
        // Exactly at the boundary
        assert!(refresh_due(Some(now - Duration::seconds(30)), 30, now));
    }

    #[test]
    fn test_zero_interval_always_due() {
        let now = Utc::now();
        assert!(refresh_due(Some(now), 0, now));
    }
}
