//! Inbox search
//!
//! A small Gmail-style query language. Raw input goes through the
//! [`tokenize`]r and the parser into a [`ParsedQuery`], which [`matches`]
//! evaluates per thread. [`suggestions`] and [`active_chips`] drive the
//! search box feedback.

mod predicate;
mod query_parser;
mod suggest;
mod tokenizer;

pub use predicate::{ThreadFacts, matches};
pub use query_parser::{DateBound, FolderFilter, ParsedQuery, parse, parse_query};
pub use suggest::{
    CATALOG, FilterChip, OperatorSuggestion, Suggestion, active_chips, apply_suggestion,
    suggestions,
};
pub use tokenizer::tokenize;
