//! Bounded display rendering
//!
//! Renders any value to a short textual summary for audit records and
//! review UIs. Summaries are best effort: they are for humans and do not
//! round-trip back to the original value.

use crate::value::Value;

/// Marker appended when a summary was cut short.
const ELLIPSIS: &str = "...";

/// Render a value to a bounded-length display string.
///
/// Null yields `None`. Collections render as `[el1,el2,...]`, truncating the
/// remaining elements once the accumulated length passes `max_len`. Scalars
/// and entity references render their display form, cut to `max_len`
/// characters with a trailing `...`. A `max_len` of `0` disables truncation.
pub fn stringify(value: &Value, max_len: usize) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(stringify_element(other, max_len)),
    }
}

/// Render one element, recursing into nested collections.
pub(crate) fn stringify_element(value: &Value, max_len: usize) -> String {
    match value {
        Value::Null => String::new(),
        Value::Boolean(b) => b.to_string(),
        Value::Integer(i) => truncate_chars(&i.to_string(), max_len),
        Value::Float(x) => truncate_chars(&x.to_string(), max_len),
        Value::String(s) => truncate_chars(s, max_len),
        Value::Entity(entity) => truncate_chars(entity.display(), max_len),
        Value::Collection(items) => stringify_collection(items, max_len),
    }
}

/// Render a collection as `[el1,el2,...]`.
pub(crate) fn stringify_collection(items: &[Value], max_len: usize) -> String {
    let mut out = String::from("[");
    let mut rendered = 1usize;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
            rendered += 1;
        }
        let piece = stringify_element(item, max_len);
        rendered += piece.chars().count();
        out.push_str(&piece);
        if max_len > 0 && rendered > max_len && i + 1 < items.len() {
            out.push(',');
            out.push_str(ELLIPSIS);
            break;
        }
    }
    out.push(']');
    out
}

/// Cut a string to `max_len` characters, appending `...` when shortened.
///
/// Operates on characters, not bytes, so multi-byte input never splits.
pub(crate) fn truncate_chars(s: &str, max_len: usize) -> String {
    if max_len == 0 || s.chars().count() <= max_len {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_len).collect();
    out.push_str(ELLIPSIS);
    out
}
