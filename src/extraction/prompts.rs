/*!
 * Prompt templates for bilingual extraction and merge requests.
 *
 * All templates restate the same strict JSON contract; the retry template
 * additionally embeds the violated rule as a model-facing instruction, and
 * the merge template embeds the exact classification heuristic the Rust
 * classifier uses, so both sides agree on the same boundary.
 */

use crate::corpus::classify::ClassifyPolicy;
use crate::corpus::model::ExtractionResult;

/// The output contract shared by the extraction, retry, and merge prompts.
const JSON_CONTRACT: &str = r#"Respond with strict JSON only, no markdown fences and no commentary, in this exact shape:
{
  "originalText": "<the source text, transcribed as faithfully as possible>",
  "sentencePairs": [{"en": "<English sentence>", "zh": "<Chinese translation>"}],
  "wordPairs": [{"en": "<English word or phrase>", "zh": "<Chinese translation>"}]
}

Rules:
- Every "en" value must be pure English: no Chinese characters, no IPA or phonetic notation, no part-of-speech tags.
- Every "zh" value must be written in Chinese: no untranslated English-only lines, no IPA or phonetic notation.
- Both sides of every pair must be non-empty.
- Keep sentencePairs and wordPairs aligned one-to-one with their translations."#;

/// System prompt for extraction requests.
pub const EXTRACTION_SYSTEM_PROMPT: &str = "You are an assistant that turns bilingual \
English/Chinese study material into a structured, line-aligned corpus. You transcribe \
faithfully, pair each English item with its Chinese counterpart, and always answer with \
strict JSON.";

/// System prompt for merge requests.
pub const MERGE_SYSTEM_PROMPT: &str = "You are an assistant that maintains a bilingual \
English/Chinese study corpus. You merge new material into an existing corpus, removing \
duplicates while keeping every pair aligned, and always answer with strict JSON.";

/// Build the initial extraction prompt for one block of source text.
pub fn build_extraction_prompt(source_text: &str) -> String {
    format!(
        "Extract the bilingual content from the study material below.\n\n\
         {JSON_CONTRACT}\n\n\
         Study material:\n\
         ---\n\
         {source_text}\n\
         ---"
    )
}

/// Build the single retry prompt after a purity-validation failure.
///
/// Restates the full contract, embeds the specific correction, and repeats
/// the unchanged source context.
pub fn build_retry_prompt(source_text: &str, instruction: &str) -> String {
    format!(
        "Your previous answer was rejected for this reason: {instruction}\n\n\
         Produce a corrected answer for the same study material.\n\n\
         {JSON_CONTRACT}\n\n\
         Study material:\n\
         ---\n\
         {source_text}\n\
         ---"
    )
}

/// Build the merge prompt combining the accumulated corpus with new lines.
pub fn build_merge_prompt(
    existing: &ExtractionResult,
    new_original_text: &str,
    new_english_lines: &[String],
    new_chinese_lines: &[String],
    policy: &ClassifyPolicy,
) -> String {
    let existing_pairs = existing
        .english_lines()
        .iter()
        .zip(existing.chinese_lines())
        .map(|(en, zh)| format!("{en} | {zh}"))
        .collect::<Vec<_>>()
        .join("\n");

    let new_pairs = new_english_lines
        .iter()
        .zip(new_chinese_lines)
        .map(|(en, zh)| format!("{en} | {zh}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Merge newly extracted bilingual study content into an existing corpus.\n\n\
         Existing original text:\n\
         ---\n\
         {existing_original}\n\
         ---\n\
         Existing pairs (English | Chinese):\n\
         ---\n\
         {existing_pairs}\n\
         ---\n\n\
         New original text:\n\
         ---\n\
         {new_original_text}\n\
         ---\n\
         New pairs (English | Chinese):\n\
         ---\n\
         {new_pairs}\n\
         ---\n\n\
         Tasks:\n\
         1. Merge the original texts into one coherent narrative, removing duplicated passages.\n\
         2. Merge and deduplicate the pairs, re-emitting them as sentencePairs and wordPairs: \
         {classification_rule}.\n\
         3. Preserve one-to-one correspondence between every pair's \"en\" and \"zh\".\n\n\
         {JSON_CONTRACT}",
        existing_original = existing.original_text,
        classification_rule = policy.describe_for_prompt(),
    )
}
