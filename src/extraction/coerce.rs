/*!
 * Best-effort coercion of arbitrary JSON values into pair text.
 *
 * The model occasionally nests pair text inside objects or arrays instead of
 * emitting plain strings. Coercion recovers the text where it can; when it
 * cannot, the enclosing pair is dropped by the extractor rather than
 * aborting the whole batch.
 */

use serde_json::Value;

/// Depth limit for the structural walk.
const MAX_WALK_DEPTH: usize = 6;

/// Leaf budget for the structural walk.
const MAX_WALK_LEAVES: usize = 80;

/// Keys tried first when walking an object, before any remaining keys.
const PREFERRED_KEYS: &[&str] = &["text", "content", "value", "message", "data"];

/// Coerce a single JSON value into its best-effort text representation.
///
/// Strings pass through; numbers and booleans stringify; an object with a
/// string `text` field yields that field; an array concatenates the string or
/// `.text` content of its elements. Anything else falls back to a bounded
/// depth-first walk collecting scalar leaves. Returns `None` when no text can
/// be recovered.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                return Some(text.clone());
            }
            walk(value)
        }
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.as_str()),
                    Value::Object(map) => map.get("text").and_then(Value::as_str),
                    _ => None,
                })
                .collect();
            if parts.is_empty() {
                walk(value)
            } else {
                Some(parts.join(" "))
            }
        }
        Value::Null => None,
    }
}

fn walk(value: &Value) -> Option<String> {
    let mut leaves = Vec::new();
    collect_leaves(value, 0, &mut leaves);
    if leaves.is_empty() {
        None
    } else {
        Some(leaves.join(" "))
    }
}

fn collect_leaves(value: &Value, depth: usize, leaves: &mut Vec<String>) {
    if depth > MAX_WALK_DEPTH || leaves.len() >= MAX_WALK_LEAVES {
        return;
    }

    match value {
        Value::String(s) => {
            if !s.trim().is_empty() {
                leaves.push(s.trim().to_string());
            }
        }
        Value::Number(n) => leaves.push(n.to_string()),
        Value::Bool(b) => leaves.push(b.to_string()),
        Value::Array(items) => {
            for item in items {
                collect_leaves(item, depth + 1, leaves);
            }
        }
        Value::Object(map) => {
            for key in PREFERRED_KEYS {
                if let Some(inner) = map.get(*key) {
                    collect_leaves(inner, depth + 1, leaves);
                }
            }
            for (key, inner) in map {
                if !PREFERRED_KEYS.contains(&key.as_str()) {
                    collect_leaves(inner, depth + 1, leaves);
                }
            }
        }
        Value::Null => {}
    }
}
