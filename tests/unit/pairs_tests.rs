/*!
 * Shape-matrix tests for the tolerant pair extractor, exercised through the
 * public API with full response payloads.
 */

use bicorpus::extraction::normalize::parse_model_json;
use bicorpus::extraction::pairs::{extract_pairs, extract_parallel_lines};
use serde_json::json;

#[test]
fn test_extractPairs_withAllThreeArrayKeys_shouldAccumulateInPrecedenceOrder() {
    let value = json!({
        "pairs": [{"en": "legacy", "zh": "旧"}],
        "wordPairs": [{"en": "word", "zh": "词"}],
        "sentencePairs": [{"en": "A full sentence here", "zh": "一个完整的句子"}]
    });

    let pairs = extract_pairs(&value);

    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[0].en, "A full sentence here");
    assert_eq!(pairs[1].en, "word");
    assert_eq!(pairs[2].en, "legacy");
}

#[test]
fn test_extractPairs_withCoercibleScalars_shouldStringify() {
    let value = json!({
        "wordPairs": [
            {"en": "one", "zh": "一"},
            {"en": 2, "zh": "二"}
        ]
    });

    let pairs = extract_pairs(&value);
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[1].en, "2");
}

#[test]
fn test_extractPairs_withArrayValuedSide_shouldConcatenate() {
    let value = json!({
        "sentencePairs": [
            {"en": ["Good", "morning"], "zh": "早上好"}
        ]
    });

    let pairs = extract_pairs(&value);
    assert_eq!(pairs[0].en, "Good morning");
}

#[test]
fn test_extractPairs_throughNormalizer_shouldHandleFencedResponse() {
    let raw = "```json\n{\"sentencePairs\": [{\"en\": \"Hello\", \"zh\": \"你好\"}]}\n```";
    let value = parse_model_json(raw).unwrap();
    let pairs = extract_pairs(&value);
    assert_eq!(pairs.len(), 1);
}

#[test]
fn test_extractParallelLines_shouldNotApplyStructuralCoercion() {
    // The fallback tier is stricter: an object element fails the whole
    // fallback instead of being coerced.
    let value = json!({
        "enLines": [{"text": "Hello"}],
        "zhLines": ["你好"]
    });
    assert!(extract_parallel_lines(&value).is_none());
}

#[test]
fn test_extractPairs_emptyArrays_shouldYieldNothing() {
    let value = json!({"sentencePairs": [], "wordPairs": []});
    assert!(extract_pairs(&value).is_empty());
}
