//! Query API for UI consumption
//!
//! Turns a thread snapshot plus the current search and folder state into
//! the rows a mailbox list displays.

mod threads;

pub use threads::{ThreadSummary, filter_threads, is_search_active};
