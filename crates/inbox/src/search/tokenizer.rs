//! Search input tokenizer
//!
//! Splits raw search input on whitespace, keeping quoted sections together.
//! A token is one of:
//! - `key:"quoted value"` (may contain whitespace)
//! - `"quoted phrase"`
//! - any other run of non-whitespace characters, including `key:value`
//!
//! Quotes stay in the token; stripping them is the parser's job. No
//! validation happens here, so `anything:goes` is a token like any other.

/// Split raw input into tokens, in input order
pub fn tokenize(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        // Skip whitespace
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }

        let rest = &chars[i..];
        let consumed = quoted_len(rest).unwrap_or_else(|| word_len(rest));
        tokens.push(rest[..consumed].iter().collect());
        i += consumed;
    }

    tokens
}

/// Length of a quoted token at the start of `chars`, if it is one.
///
/// An opening quote without a matching close is not a quoted token; the
/// caller falls back to a plain word.
fn quoted_len(chars: &[char]) -> Option<usize> {
    let key_len = chars.iter().take_while(|c| is_key_char(**c)).count();
    let open = if key_len > 0 && chars.get(key_len) == Some(&':') {
        key_len + 1
    } else {
        0
    };

    if chars.get(open) != Some(&'"') {
        return None;
    }

    let close = chars[open + 1..].iter().position(|c| *c == '"')?;
    Some(open + 1 + close + 1)
}

/// Length of the non-whitespace run at the start of `chars`
fn word_len(chars: &[char]) -> usize {
    chars.iter().take_while(|c| !c.is_whitespace()).count()
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
