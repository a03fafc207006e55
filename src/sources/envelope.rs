//! Normalisation of list responses into [`Page`].
//!
//! Endpoints answer either with a bare JSON array or with an envelope
//! object carrying the items and a continuation cursor. This module is the
//! only place that knows about both shapes.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::Result;
use crate::state::{Cursor, Page};

/// Envelope keys that may hold the item array, in lookup order.
const ITEM_KEYS: &[&str] = &["items", "data", "results"];
/// Envelope keys that may hold the continuation token, in lookup order.
const CURSOR_KEYS: &[&str] = &["nextCursor", "next_cursor"];

/// Which shape a list response arrived in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageShape {
    /// Bare JSON array, no pagination.
    Bare,
    /// Object with items and an optional cursor.
    Envelope,
}

/// What: Classify a list response without decoding it.
///
/// Inputs:
/// - `body`: Parsed response body.
///
/// Output:
/// - `Some(PageShape)` for arrays and objects; `None` for any other JSON value.
#[must_use]
pub const fn classify(body: &Value) -> Option<PageShape> {
    match body {
        Value::Array(_) => Some(PageShape::Bare),
        Value::Object(_) => Some(PageShape::Envelope),
        _ => None,
    }
}

/// What: Read a continuation token from an envelope.
///
/// Inputs:
/// - `map`: Envelope object.
///
/// Output:
/// - Cursor from the first present key; strings and numbers are accepted, `null`/blank mean none.
fn cursor_from_envelope(map: &Map<String, Value>) -> Option<Cursor> {
    let raw = CURSOR_KEYS.iter().find_map(|k| map.get(*k))?;
    match raw {
        Value::String(s) => Cursor::new(s.as_str()),
        Value::Number(n) => Cursor::new(n.to_string()),
        _ => None,
    }
}

/// What: Convert any supported list response into a `Page`.
///
/// Inputs:
/// - `body`: Parsed response body.
///
/// Output:
/// - `Ok(Page)`; a bare array becomes a terminal page (`next_cursor = None`).
///
/// # Errors
/// - Returns `Err` when the body is neither an array nor an object
/// - Returns `Err` when an envelope has no item array under any known key
/// - Returns `Err` when an item does not decode into `T`
///
/// Details:
/// - An envelope whose item key holds `null` yields an empty page.
pub fn normalize_page<T: DeserializeOwned>(body: Value) -> Result<Page<T>> {
    match body {
        Value::Array(_) => {
            let items: Vec<T> = serde_json::from_value(body)?;
            tracing::trace!(count = items.len(), "bare list response");
            Ok(Page::bare(items))
        }
        Value::Object(mut map) => {
            let next_cursor = cursor_from_envelope(&map);
            let raw_items = ITEM_KEYS
                .iter()
                .find_map(|k| map.remove(*k))
                .ok_or("response envelope has no item list")?;
            let items: Vec<T> = if raw_items.is_null() {
                Vec::new()
            } else {
                serde_json::from_value(raw_items)?
            };
            tracing::trace!(
                count = items.len(),
                has_next = next_cursor.is_some(),
                "paginated list response"
            );
            Ok(Page::new(items, next_cursor))
        }
        other => Err(format!("unexpected list response: {other}").into()),
    }
}
