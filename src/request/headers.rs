//! Raw header normalization.

use indexmap::IndexMap;

/// Build a header map from an alternating key/value sequence.
///
/// Only even, non-empty sequences are read; anything else yields an empty
/// map. Keys are lower-cased, values kept as-is, and a repeated key keeps
/// the last value.
pub fn normalize_headers<S: AsRef<str>>(raw: &[S]) -> IndexMap<String, String> {
    let mut headers = IndexMap::new();

    if raw.is_empty() || raw.len() % 2 != 0 {
        return headers;
    }

    for pair in raw.chunks_exact(2) {
        let key = pair[0].as_ref().to_lowercase();
        let value = pair[1].as_ref().to_string();
        headers.insert(key, value);
    }

    headers
}
