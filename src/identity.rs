//! Journey identifier extraction.
//!
//! The journeys service does not contractually fix its response envelope,
//! so the harness tolerates several reasonable conventions without guessing
//! beyond them. The priority table is an explicit ordered list: the most
//! specific key first (Mongo-style `_id`), the generic `id` last, nested
//! `data` envelopes after the top-level keys.

use serde_json::Value;

/// Key paths probed for a journey identifier, highest priority first.
pub const ID_KEY_PRIORITY: [&[&str]; 5] = [
    &["_id"],
    &["journey_id"],
    &["id"],
    &["data", "_id"],
    &["data", "id"],
];

/// Locate the journey identifier in `body`, if any.
///
/// Returns the first non-empty string found under [`ID_KEY_PRIORITY`].
/// An identifier is non-empty text: numeric ids and empty strings do not
/// count and fall through to the next candidate key.
pub fn extract_journey_id(body: &Value) -> Option<&str> {
    ID_KEY_PRIORITY.iter().find_map(|path| {
        let mut cursor = body;
        for key in *path {
            cursor = cursor.get(key)?;
        }
        cursor.as_str().filter(|id| !id.is_empty())
    })
}
