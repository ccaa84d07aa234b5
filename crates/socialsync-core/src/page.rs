//! Uniform pagination state returned by every post-list scrape.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Vendor continuation token. Callers treat it as opaque and hand it back
/// unchanged on the next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cursor {
    Number(i64),
    Token(String),
}

impl Cursor {
    /// Renders the cursor exactly as the vendor expects it in a query string.
    #[must_use]
    pub fn to_param(&self) -> String {
        match self {
            Cursor::Token(token) => token.clone(),
            Cursor::Number(n) => n.to_string(),
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Token(token) => f.write_str(token),
            Cursor::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            has_more: false,
            next_cursor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cursor_renders_without_quotes() {
        assert_eq!(Cursor::Number(1_700_000_000_000).to_param(), "1700000000000");
    }

    #[test]
    fn token_cursor_renders_verbatim() {
        let token = "QVFDb3J6dF9fX2E=";
        assert_eq!(Cursor::Token(token.to_owned()).to_param(), token);
    }

    #[test]
    fn cursor_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Cursor::Number(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&Cursor::Token("abc".to_owned())).unwrap(),
            "\"abc\""
        );
    }

    #[test]
    fn page_uses_camel_case_fields() {
        let page = Page {
            items: vec![1, 2],
            has_more: true,
            next_cursor: Some(Cursor::Number(9)),
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["hasMore"], true);
        assert_eq!(json["nextCursor"], 9);
    }
}
