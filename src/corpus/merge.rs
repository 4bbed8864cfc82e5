/*!
 * Incremental merge of the accumulated corpus with newly extracted batches.
 *
 * The merge is one model call with no retry: retrying would re-embed the
 * entire accumulated corpus, which is expensive and not guaranteed to
 * converge, so a failed merge surfaces to the caller instead. The engine is
 * a pure function from (existing, new batches) to a replacement result;
 * persisting the result is the caller's responsibility.
 */

use log::{debug, warn};

use crate::corpus::classify::ClassifyPolicy;
use crate::corpus::model::ExtractionResult;
use crate::errors::ExtractionError;
use crate::extraction::orchestrator::flatten_payload;
use crate::extraction::{normalize, prompts};
use crate::providers::ChatCompleter;
use crate::validation::purity;

/// Merges newly extracted batches into an accumulated corpus.
pub struct MergeEngine<'a> {
    provider: &'a dyn ChatCompleter,
    policy: ClassifyPolicy,
}

impl<'a> MergeEngine<'a> {
    /// Create a merge engine over the given provider.
    ///
    /// The classify policy is embedded into the merge prompt so the model
    /// re-partitions pairs with the same boundary the local classifier uses.
    pub fn new(provider: &'a dyn ChatCompleter, policy: ClassifyPolicy) -> Self {
        Self { provider, policy }
    }

    /// Merge the accumulated result with new batches into a replacement
    /// result. Inputs are not mutated.
    pub async fn merge(
        &self,
        existing: &ExtractionResult,
        batches: &[ExtractionResult],
    ) -> Result<ExtractionResult, ExtractionError> {
        if batches.is_empty() {
            debug!("Merge requested with no new batches; corpus unchanged");
            return Ok(existing.clone());
        }

        let new_original_text = batches
            .iter()
            .map(|batch| batch.original_text.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        let mut new_english = Vec::new();
        let mut new_chinese = Vec::new();
        for batch in batches {
            for (en, zh) in batch.english_lines().iter().zip(batch.chinese_lines()) {
                let en = en.trim();
                let zh = zh.trim();
                if en.is_empty() || zh.is_empty() {
                    continue;
                }
                new_english.push(en.to_string());
                new_chinese.push(zh.to_string());
            }
        }

        let prompt = prompts::build_merge_prompt(
            existing,
            &new_original_text,
            &new_english,
            &new_chinese,
            &self.policy,
        );

        let raw = self
            .provider
            .complete_json(prompts::MERGE_SYSTEM_PROMPT, &prompt)
            .await?
            .filter(|content| !content.trim().is_empty())
            .ok_or(ExtractionError::EmptyResponse)?;

        debug!("Raw merge response ({} chars): {}", raw.len(), raw);

        self.interpret_response(&raw).map_err(|e| {
            warn!("Merge response rejected: {}", e);
            ExtractionError::MergeFailed(e.to_string())
        })
    }

    /// Run a merge response through the same normalize → parse → extract →
    /// validate chain as a fresh extraction, without the retry step.
    fn interpret_response(&self, raw: &str) -> Result<ExtractionResult, ExtractionError> {
        let value = normalize::parse_model_json(raw).map_err(ExtractionError::InvalidJson)?;
        let payload = flatten_payload(&value)?;

        purity::validate_purity(&payload.english, &payload.chinese)
            .map_err(ExtractionError::Validation)?;

        Ok(ExtractionResult {
            original_text: payload.original_text,
            english_text: payload.english.join("\n"),
            chinese_text: payload.chinese.join("\n"),
        })
    }
}
