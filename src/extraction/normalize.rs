/*!
 * Response text normalization.
 *
 * Models wrap their JSON in markdown fences and pad it with commentary in no
 * predictable combination. This strips both and isolates the payload. It
 * never fails: when no braces or brackets are found the text passes through
 * unchanged and the JSON parse downstream reports the error.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Fenced code block with an optional language tag.
static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[a-zA-Z0-9]*\s*(.*?)```").expect("Invalid fence regex")
});

/// Isolate the JSON payload inside a raw model response.
///
/// Steps: trim; prefer the interior of the first fenced block; drop anything
/// before the earliest `{`/`[`; drop anything after the latest `}`/`]`.
pub fn isolate_json(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    if let Some(caps) = FENCED_BLOCK.captures(&text) {
        if let Some(inner) = caps.get(1) {
            text = inner.as_str().trim().to_string();
        }
    }

    let opening = [text.find('{'), text.find('[')]
        .into_iter()
        .flatten()
        .min();
    if let Some(start) = opening {
        if start > 0 {
            text.replace_range(..start, "");
        }
    }

    let closing = [text.rfind('}'), text.rfind(']')]
        .into_iter()
        .flatten()
        .max();
    if let Some(end) = closing {
        text.truncate(end + 1);
    }

    text
}

/// Normalize and parse a raw model response into a JSON value.
pub fn parse_model_json(raw: &str) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::from_str(&isolate_json(raw))
}
