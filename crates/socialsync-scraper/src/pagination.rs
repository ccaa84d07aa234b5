//! Maps each vendor's continuation signal onto one `(has_more, next_cursor)`
//! contract.
//!
//! | Platform  | Vendor signal                         | Adapter                 |
//! |-----------|---------------------------------------|-------------------------|
//! | Instagram | `more_available` + opaque `next_max_id` | [`from_token`]        |
//! | TikTok    | `has_more` (bool or 0/1) + `max_cursor` | [`from_flagged_number`] |
//! | TikTok    | `max_cursor` only                     | [`from_number`]         |
//!
//! `has_more` is never inferred from page size, and the cursor is carried
//! verbatim: callers hand [`Cursor::to_param`] straight back to the vendor.
//! A "more" flag without a usable cursor is reported as the last page, since
//! there is nothing to continue from.

use socialsync_core::{Cursor, Page};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    pub has_more: bool,
    pub next_cursor: Option<Cursor>,
}

impl Continuation {
    #[must_use]
    pub fn done() -> Self {
        Self {
            has_more: false,
            next_cursor: None,
        }
    }

    /// Wraps `items` into a [`Page`] carrying this continuation state.
    #[must_use]
    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            has_more: self.has_more,
            next_cursor: self.next_cursor,
        }
    }
}

/// Opaque string cursor with an explicit flag. When the flag is missing the
/// presence of a token decides.
#[must_use]
pub fn from_token(more_available: Option<bool>, token: Option<String>) -> Continuation {
    let token = token.filter(|t| !t.is_empty());
    let has_more = more_available.unwrap_or(token.is_some()) && token.is_some();
    Continuation {
        has_more,
        next_cursor: if has_more { token.map(Cursor::Token) } else { None },
    }
}

/// Numeric cursor alongside an explicit flag.
#[must_use]
pub fn from_flagged_number(has_more: bool, cursor: Option<i64>) -> Continuation {
    match cursor {
        Some(n) if has_more => Continuation {
            has_more: true,
            next_cursor: Some(Cursor::Number(n)),
        },
        _ => Continuation::done(),
    }
}

/// Numeric cursor with no flag: more pages iff the cursor is present and
/// non-zero.
#[must_use]
pub fn from_number(cursor: Option<i64>) -> Continuation {
    match cursor {
        Some(n) if n != 0 => Continuation {
            has_more: true,
            next_cursor: Some(Cursor::Number(n)),
        },
        _ => Continuation::done(),
    }
}
