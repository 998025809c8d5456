//! Operator autocomplete and active filter chips

use serde::Serialize;

use super::query_parser::{DateBound, FolderFilter, ParsedQuery};
use crate::models::label_display_name;

/// A search operator offered by autocomplete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorSuggestion {
    /// Operator text; a trailing `:` means it takes a value
    pub label: &'static str,
    pub description: &'static str,
}

impl OperatorSuggestion {
    const fn new(label: &'static str, description: &'static str) -> Self {
        Self { label, description }
    }
}

/// Operators in the order the search box lists them
pub const CATALOG: &[OperatorSuggestion] = &[
    OperatorSuggestion::new("is:unread", "No leídos"),
    OperatorSuggestion::new("is:read", "Leídos"),
    OperatorSuggestion::new("is:starred", "Destacados"),
    OperatorSuggestion::new("has:attachment", "Con adjuntos"),
    OperatorSuggestion::new("from:", "Remitente contiene"),
    OperatorSuggestion::new("to:", "Destinatario contiene"),
    OperatorSuggestion::new("subject:", "Asunto contiene"),
    OperatorSuggestion::new("after:", "Después de (AAAA/MM/DD)"),
    OperatorSuggestion::new("before:", "Antes de (AAAA/MM/DD)"),
    OperatorSuggestion::new("in:inbox", "En recibidos"),
    OperatorSuggestion::new("in:sent", "En enviados"),
    OperatorSuggestion::new("in:trash", "En papelera"),
    OperatorSuggestion::new("in:archive", "Archivados"),
];

/// An autocomplete entry for the current input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub operator: OperatorSuggestion,
    /// The operator text already appears in the input
    pub active: bool,
}

/// Catalog entries applicable to the token being typed
///
/// The token is the last whitespace-separated word, or empty when the input
/// is empty or ends in whitespace; an empty token offers the whole catalog.
pub fn suggestions(catalog: &[OperatorSuggestion], input: &str) -> Vec<Suggestion> {
    let token = current_token(input).to_lowercase();

    catalog
        .iter()
        .filter(|op| op.label.to_lowercase().starts_with(&token))
        .map(|op| Suggestion {
            operator: *op,
            active: input.contains(op.label),
        })
        .collect()
}

fn current_token(input: &str) -> &str {
    if input.ends_with(char::is_whitespace) {
        return "";
    }
    input.split_whitespace().last().unwrap_or("")
}

/// New input text after picking `label` from the suggestions
///
/// Value operators (`from:`) are appended so the user can type the value;
/// picking one twice appends it twice. Flag operators (`is:unread`) toggle:
/// removed if present, appended otherwise.
pub fn apply_suggestion(input: &str, label: &str) -> String {
    if label.ends_with(':') {
        let base = input.trim_end();
        if base.is_empty() {
            return label.to_string();
        }
        return format!("{} {}", base, label);
    }

    let toggled = if input.contains(label) {
        input.replacen(label, "", 1)
    } else {
        format!("{} {}", input, label)
    };
    collapse_whitespace(&toggled)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A removable chip describing one active filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    /// ParsedQuery field the chip stands for
    pub key: &'static str,
    pub label: String,
}

impl FilterChip {
    fn new(key: &'static str, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
        }
    }
}

/// One chip per non-empty query field, in field order
pub fn active_chips(query: &ParsedQuery) -> Vec<FilterChip> {
    let mut chips = Vec::new();

    if !query.text.is_empty() {
        chips.push(FilterChip::new("text", format!("texto: {}", query.text.join(" "))));
    }
    if let Some(from) = &query.from {
        chips.push(FilterChip::new("from", format!("de: {}", from)));
    }
    if let Some(to) = &query.to {
        chips.push(FilterChip::new("to", format!("para: {}", to)));
    }
    if let Some(subject) = &query.subject {
        chips.push(FilterChip::new("subject", format!("asunto: {}", subject)));
    }
    match query.is_unread {
        Some(true) => chips.push(FilterChip::new("is_unread", "no leídos")),
        Some(false) => chips.push(FilterChip::new("is_unread", "leídos")),
        None => {}
    }
    if query.is_starred {
        chips.push(FilterChip::new("is_starred", "destacados"));
    }
    if query.has_attachment {
        chips.push(FilterChip::new("has_attachment", "con adjuntos"));
    }
    if let Some(after) = &query.after {
        chips.push(FilterChip::new("after", format!("después: {}", format_bound(after))));
    }
    if let Some(before) = &query.before {
        chips.push(FilterChip::new("before", format!("antes: {}", format_bound(before))));
    }
    match &query.in_folder {
        FolderFilter::Unset => {}
        FolderFilter::Archive => chips.push(FilterChip::new("in_folder", "archivados")),
        FolderFilter::Named(name) => chips.push(FilterChip::new(
            "in_folder",
            format!("carpeta: {}", label_display_name(name)),
        )),
    }

    chips
}

fn format_bound(bound: &DateBound) -> String {
    match bound {
        DateBound::Date(ts) => ts.format("%Y-%m-%d").to_string(),
        DateBound::Unparseable(raw) => raw.clone(),
    }
}
