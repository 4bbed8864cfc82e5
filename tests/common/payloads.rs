/*!
 * Canned model response payloads for pipeline tests.
 *
 * Builders return the raw response *text* a model would produce, so tests
 * can wrap them in fences or commentary to exercise normalization too.
 */

use serde_json::json;

/// A well-formed extraction reply with the given pairs.
pub fn extraction_reply(
    original_text: &str,
    sentence_pairs: &[(&str, &str)],
    word_pairs: &[(&str, &str)],
) -> String {
    let sentences: Vec<_> = sentence_pairs
        .iter()
        .map(|(en, zh)| json!({"en": en, "zh": zh}))
        .collect();
    let words: Vec<_> = word_pairs
        .iter()
        .map(|(en, zh)| json!({"en": en, "zh": zh}))
        .collect();

    json!({
        "originalText": original_text,
        "sentencePairs": sentences,
        "wordPairs": words,
    })
    .to_string()
}

/// A reply whose Chinese column leaks untranslated English on the first row.
pub fn impure_reply(original_text: &str) -> String {
    extraction_reply(original_text, &[("Hello there", "hello there")], &[])
}

/// A clean single-sentence reply.
pub fn clean_reply(original_text: &str) -> String {
    extraction_reply(original_text, &[("Hello there", "你好")], &[])
}

/// Wrap a reply in a markdown fence with commentary around it.
pub fn fenced(reply: &str) -> String {
    format!("Sure, here is the JSON you asked for:\n```json\n{reply}\n```\nHope this helps!")
}

/// A reply using the legacy parallel-arrays shape.
pub fn parallel_lines_reply(original_text: &str, en: &[&str], zh: &[&str]) -> String {
    json!({
        "originalText": original_text,
        "enLines": en,
        "zhLines": zh,
    })
    .to_string()
}
