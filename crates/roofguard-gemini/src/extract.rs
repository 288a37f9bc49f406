//! Best-effort extraction of a JSON object embedded in free-form model text.
//!
//! Map-grounded calls cannot use strict JSON mode, so the model is asked to
//! answer with a JSON object and often wraps it in prose or code fences.

use serde_json::{Map, Value};

/// Finds the first balanced `{...}` span in `text` that parses as a JSON
/// object and returns that object.
///
/// Spans are tried left to right starting at each `{`. Braces inside JSON
/// string literals (including escaped quotes) do not affect balance. A span
/// that balances but is not valid JSON is skipped and the search resumes at
/// the next `{`, which lets an object nested inside non-JSON braces still be
/// found. Returns `None` when no candidate parses.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(end) = balanced_span_end(text, start) {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text[start..end]) {
                return Some(map);
            }
        }
        search_from = start + 1;
    }
    None
}

/// Returns the exclusive end index of the balanced span opening at `start`,
/// or `None` if the text ends before the span closes.
fn balanced_span_end(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
