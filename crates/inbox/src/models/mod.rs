//! Domain models for inbox entities

pub mod label;
mod message;
mod thread;

pub use label::label_display_name;
pub use message::{EmailAddress, Message, MessageBuilder, MessageId};
pub use thread::{Thread, ThreadId};
