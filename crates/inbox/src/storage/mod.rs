//! Thread store trait and implementations
//!
//! The inbox never talks to the remote data service directly; it goes
//! through [`ThreadStore`] so the backend can be swapped for an in-memory
//! store in tests or a snapshot file in the terminal front-end.

mod file;
mod memory;
mod traits;

pub use file::JsonFileThreadStore;
pub use memory::InMemoryThreadStore;
pub use traits::ThreadStore;
