/*!
 * Tolerant extraction of bilingual pairs from parsed model JSON.
 *
 * The model emits one of several shapes depending on mood and prompt
 * version. Each accepted shape is an explicit variant resolved in a fixed
 * precedence order; this module is the single place shape ambiguity is
 * resolved.
 */

use log::warn;
use serde_json::Value;

use super::coerce::coerce_text;
use crate::corpus::model::BilingualPair;

/// Accepted payload shapes, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairShape {
    /// `sentencePairs: [{en, zh}, ...]`
    SentencePairs,
    /// `wordPairs: [{en, zh}, ...]`
    WordPairs,
    /// Legacy `pairs: [{en, zh}, ...]`
    LegacyPairs,
    /// Fallback parallel arrays `enLines` / `zhLines`
    ParallelLines,
}

/// The pair-array shapes, in the order they are accumulated. The ordering is
/// significant: downstream sentence/word classification is positional, so
/// sentence pairs must precede word pairs in the flattened list.
const PAIR_ARRAY_SHAPES: &[PairShape] =
    &[PairShape::SentencePairs, PairShape::WordPairs, PairShape::LegacyPairs];

impl PairShape {
    /// JSON key the shape's pair array lives under.
    fn key(&self) -> &'static str {
        match self {
            Self::SentencePairs => "sentencePairs",
            Self::WordPairs => "wordPairs",
            Self::LegacyPairs => "pairs",
            Self::ParallelLines => "enLines",
        }
    }
}

/// Extract pairs from the three pair-array shapes, accumulated in precedence
/// order.
///
/// Each item's `en` and `zh` are coerced to text; an item is kept only when
/// both sides are non-empty after trimming. A malformed item is dropped with
/// a warning, never a hard error, so one bad pair cannot abort the batch.
pub fn extract_pairs(value: &Value) -> Vec<BilingualPair> {
    let mut pairs = Vec::new();

    for shape in PAIR_ARRAY_SHAPES {
        let Some(items) = value.get(shape.key()).and_then(Value::as_array) else {
            continue;
        };

        for (index, item) in items.iter().enumerate() {
            let en = item.get("en").and_then(coerce_text);
            let zh = item.get("zh").and_then(coerce_text);

            match (en, zh) {
                (Some(en), Some(zh))
                    if !en.trim().is_empty() && !zh.trim().is_empty() =>
                {
                    pairs.push(BilingualPair::new(en.trim(), zh.trim()));
                }
                _ => {
                    warn!(
                        "Dropping {} item {}: could not coerce both sides to text",
                        shape.key(),
                        index
                    );
                }
            }
        }
    }

    pairs
}

/// Strict fallback for the parallel `enLines`/`zhLines` shape.
///
/// Both arrays must be present and every element must already be a string;
/// a single malformed element fails the whole fallback. Elements are trimmed.
/// The shape here is simpler than the pair path, so it gets the stricter
/// treatment.
pub fn extract_parallel_lines(value: &Value) -> Option<(Vec<String>, Vec<String>)> {
    let english = string_array(value.get("enLines")?)?;
    let chinese = string_array(value.get("zhLines")?)?;
    Some((english, chinese))
}

fn string_array(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(|s| s.trim().to_string()))
        .collect()
}
