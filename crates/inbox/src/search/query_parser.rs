//! Gmail-style query parser
//!
//! Turns tokens into a [`ParsedQuery`]. Recognized operators:
//! - `from:juan`, `to:ventas`, `subject:"depto centro"` - substring filters
//! - `is:unread`, `is:read`, `is:starred`
//! - `has:attachment`
//! - `after:2024/01/31`, `before:2024-12-01` - date bounds
//! - `in:inbox|sent|starred|trash|spam|archive`, or any label name
//!
//! Single-valued operators are last-wins. Everything else, including
//! `key:value` tokens with an unknown key, becomes a free-text term.
//! Parsing never fails.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::tokenizer::tokenize;
use crate::models::label;

/// Folder restriction from an `in:` operator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FolderFilter {
    /// No `in:` operator
    #[default]
    Unset,
    /// Thread must carry this label
    Named(String),
    /// Thread must carry neither INBOX nor TRASH
    Archive,
}

impl FolderFilter {
    pub fn is_unset(&self) -> bool {
        matches!(self, FolderFilter::Unset)
    }
}

/// A date bound from `after:` / `before:`
///
/// Input that doesn't parse is kept as `Unparseable`; such a bound never
/// excludes anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateBound {
    Date(DateTime<Utc>),
    Unparseable(String),
}

impl DateBound {
    /// Parse `YYYY-MM-DD` or `YYYY/MM/DD` (midnight UTC), or an RFC 3339
    /// timestamp
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.replace('/', "-");

        if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            && let Some(midnight) = date.and_hms_opt(0, 0, 0)
        {
            return DateBound::Date(Utc.from_utc_datetime(&midnight));
        }

        if let Ok(ts) = DateTime::parse_from_rfc3339(&normalized) {
            return DateBound::Date(ts.with_timezone(&Utc));
        }

        DateBound::Unparseable(raw.to_string())
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            DateBound::Date(ts) => Some(*ts),
            DateBound::Unparseable(_) => None,
        }
    }
}

/// Parsed query with one field per operator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedQuery {
    /// Lowercased free-text terms, all of which must match
    pub text: Vec<String>,
    /// Lowercased from: substring
    pub from: Option<String>,
    /// Lowercased to: substring
    pub to: Option<String>,
    /// Lowercased subject: substring
    pub subject: Option<String>,
    /// is:unread (true) / is:read (false)
    pub is_unread: Option<bool>,
    /// is:starred; `false` means don't care
    pub is_starred: bool,
    /// has:attachment; `false` means don't care
    pub has_attachment: bool,
    pub after: Option<DateBound>,
    pub before: Option<DateBound>,
    pub in_folder: FolderFilter,
}

impl ParsedQuery {
    /// Check if the query has no terms or filters
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.from.is_none()
            && self.to.is_none()
            && self.subject.is_none()
            && self.is_unread.is_none()
            && !self.is_starred
            && !self.has_attachment
            && self.after.is_none()
            && self.before.is_none()
            && self.in_folder.is_unset()
    }
}

/// Tokenize and parse raw search input
pub fn parse_query(input: &str) -> ParsedQuery {
    parse(&tokenize(input))
}

/// Build a query from tokens, processed left to right
pub fn parse(tokens: &[String]) -> ParsedQuery {
    let mut query = ParsedQuery::default();

    for token in tokens {
        if !apply_operator(&mut query, token) {
            let term = strip_quotes(token).to_lowercase();
            if !term.is_empty() {
                query.text.push(term);
            }
        }
    }

    query
}

/// Apply `token` as an operator. Returns false when it isn't one.
///
/// An operator with an empty value is consumed without changing the query.
fn apply_operator(query: &mut ParsedQuery, token: &str) -> bool {
    match token.to_lowercase().as_str() {
        "is:unread" => {
            query.is_unread = Some(true);
            return true;
        }
        "is:read" => {
            query.is_unread = Some(false);
            return true;
        }
        "is:starred" => {
            query.is_starred = true;
            return true;
        }
        "has:attachment" => {
            query.has_attachment = true;
            return true;
        }
        _ => {}
    }

    let Some((key, raw_value)) = token.split_once(':') else {
        return false;
    };
    let value = strip_quotes(raw_value);

    // An empty value clears the field so a later `from:` still wins
    let slot = match key.to_lowercase().as_str() {
        "from" => &mut query.from,
        "to" => &mut query.to,
        "subject" => &mut query.subject,
        "after" => {
            query.after = (!value.is_empty()).then(|| DateBound::parse(value));
            return true;
        }
        "before" => {
            query.before = (!value.is_empty()).then(|| DateBound::parse(value));
            return true;
        }
        "in" => {
            query.in_folder = if value.is_empty() {
                FolderFilter::Unset
            } else {
                resolve_folder(value)
            };
            return true;
        }
        _ => return false,
    };

    *slot = (!value.is_empty()).then(|| value.to_lowercase());
    true
}

fn resolve_folder(value: &str) -> FolderFilter {
    match value.to_lowercase().as_str() {
        "inbox" => FolderFilter::Named(label::INBOX.to_string()),
        "sent" => FolderFilter::Named(label::SENT.to_string()),
        "starred" => FolderFilter::Named(label::STARRED.to_string()),
        "trash" => FolderFilter::Named(label::TRASH.to_string()),
        "spam" => FolderFilter::Named(label::SPAM.to_string()),
        "archive" => FolderFilter::Archive,
        _ => FolderFilter::Named(value.to_uppercase()),
    }
}

/// Remove one leading and one trailing double quote
fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix('"').unwrap_or(s);
    s.strip_suffix('"').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_query() {
        let query = parse_query("");
        assert!(query.is_empty());
        assert_eq!(query, ParsedQuery::default());

        assert!(parse_query("   ").is_empty());
    }

    #[test]
    fn test_parse_simple_terms_lowercased() {
        let query = parse_query("Hola Mundo");
        assert_eq!(query.text, vec!["hola", "mundo"]);
        assert!(query.from.is_none());
    }

    #[test]
    fn test_parse_quoted_phrase_is_one_term() {
        let query = parse_query("\"Depto Centro\"");
        assert_eq!(query.text, vec!["depto centro"]);
    }

    #[test]
    fn test_from_is_last_wins() {
        let query = parse_query("from:a from:b");
        assert_eq!(query.from.as_deref(), Some("b"));
    }

    #[test]
    fn test_text_accumulates_around_operators() {
        let query = parse_query("hello from:x world");
        assert_eq!(query.text, vec!["hello", "world"]);
        assert_eq!(query.from.as_deref(), Some("x"));
    }

    #[test]
    fn test_quoted_operator_value() {
        let query = parse_query("subject:\"Oferta Depto\" to:Ventas@Sur.cl");
        assert_eq!(query.subject.as_deref(), Some("oferta depto"));
        assert_eq!(query.to.as_deref(), Some("ventas@sur.cl"));
    }

    #[test]
    fn test_operator_keys_are_case_insensitive() {
        let query = parse_query("FROM:Juan IS:UNREAD");
        assert_eq!(query.from.as_deref(), Some("juan"));
        assert_eq!(query.is_unread, Some(true));
    }

    #[test]
    fn test_is_flags() {
        assert_eq!(parse_query("is:unread").is_unread, Some(true));
        assert_eq!(parse_query("is:read").is_unread, Some(false));
        assert_eq!(parse_query("is:unread is:read").is_unread, Some(false));
        assert!(parse_query("is:starred").is_starred);
        assert!(parse_query("has:attachment").has_attachment);
    }

    #[test]
    fn test_unknown_operator_becomes_text() {
        let query = parse_query("foo:bar is:important");
        assert_eq!(query.text, vec!["foo:bar", "is:important"]);
        assert!(query.is_unread.is_none());
    }

    #[test]
    fn test_in_folder_table() {
        assert_eq!(
            parse_query("in:inbox").in_folder,
            FolderFilter::Named("INBOX".to_string())
        );
        assert_eq!(
            parse_query("in:Trash").in_folder,
            FolderFilter::Named("TRASH".to_string())
        );
        assert_eq!(parse_query("in:archive").in_folder, FolderFilter::Archive);
        assert_eq!(
            parse_query("in:clientes_vip").in_folder,
            FolderFilter::Named("CLIENTES_VIP".to_string())
        );
    }

    #[test]
    fn test_in_folder_last_wins() {
        assert_eq!(
            parse_query("in:archive in:sent").in_folder,
            FolderFilter::Named("SENT".to_string())
        );
    }

    #[test]
    fn test_date_bounds_slash_and_dash() {
        let query = parse_query("after:2024/01/01 before:2024-12-31");
        let after = query.after.unwrap().as_datetime().unwrap();
        let before = query.before.unwrap().as_datetime().unwrap();
        assert_eq!(after.format("%Y-%m-%d").to_string(), "2024-01-01");
        assert_eq!(before.format("%Y-%m-%d").to_string(), "2024-12-31");
    }

    #[test]
    fn test_malformed_date_is_kept_unparseable() {
        let query = parse_query("after:ayer");
        assert_eq!(
            query.after,
            Some(DateBound::Unparseable("ayer".to_string()))
        );
    }

    #[test]
    fn test_empty_value_clears_earlier_operator() {
        let query = parse_query("from:juan from: in:archive in: after:2024/01/01 after:");
        assert!(query.from.is_none());
        assert!(query.in_folder.is_unset());
        assert!(query.after.is_none());
        assert!(query.text.is_empty());
        assert!(query.is_empty());
    }

    #[test]
    fn test_value_after_empty_operator_wins() {
        let query = parse_query("subject: subject:Arriendo before: before:2024/05/01");
        assert_eq!(query.subject.as_deref(), Some("arriendo"));
        assert!(query.before.is_some());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let input = "from:juan \"casa grande\" after:2024/02/30 x:y";
        assert_eq!(parse_query(input), parse_query(input));
    }
}
