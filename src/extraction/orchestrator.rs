/*!
 * Extraction orchestration: request, parse, validate, bounded retry.
 *
 * One extraction attempt is modeled as an explicit state machine rather than
 * nested error handling, which makes the "exactly one retry" policy a
 * visible, testable invariant: `Retrying` can be entered at most once, so an
 * extraction makes at most two model calls before terminating in `Accepted`
 * or `Failed`.
 */

use log::{debug, warn};
use serde_json::Value;

use super::{normalize, pairs, prompts};
use crate::corpus::model::ExtractionResult;
use crate::errors::ExtractionError;
use crate::providers::ChatCompleter;
use crate::validation::alignment;
use crate::validation::purity::{self, PurityViolation};

/// States of one extraction attempt.
///
/// `Requesting` is the initial state; `Accepted` and `Failed` are terminal.
/// Purity failures move through `Retrying` back to `Requesting` exactly once;
/// parse and shape failures go straight to `Failed` with no retry, since a
/// retry prompt cannot meaningfully ask the model to fix JSON syntax.
enum ExtractionStep {
    Requesting { prompt: String },
    Parsing { raw: String },
    Validating(FlattenedPayload),
    Retrying { violation: PurityViolation },
    Accepted(ExtractionResult),
    Failed(ExtractionError),
}

/// A payload flattened into aligned line arrays, ready for validation.
pub(crate) struct FlattenedPayload {
    pub original_text: String,
    pub english: Vec<String>,
    pub chinese: Vec<String>,
}

/// Flatten a parsed payload into aligned English/Chinese line arrays.
///
/// The pair-array shapes produce pre-aligned lines by construction; the
/// parallel-array fallback is reconciled by the alignment normalizer first
/// and rejected on a genuine length mismatch. Shared by the extraction and
/// merge paths.
pub(crate) fn flatten_payload(value: &Value) -> Result<FlattenedPayload, ExtractionError> {
    let original_text = value
        .get("originalText")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(ExtractionError::MissingOriginalText)?
        .to_string();

    let extracted = pairs::extract_pairs(value);
    if !extracted.is_empty() {
        let (english, chinese) = extracted
            .into_iter()
            .map(|pair| (pair.en, pair.zh))
            .unzip();
        return Ok(FlattenedPayload {
            original_text,
            english,
            chinese,
        });
    }

    let Some((english_raw, chinese_raw)) = pairs::extract_parallel_lines(value) else {
        return Err(ExtractionError::NoPairs);
    };

    let (english, chinese) = alignment::reconcile(english_raw, chinese_raw);
    if english.len() != chinese.len() {
        return Err(ExtractionError::LengthMismatch {
            en: english.len(),
            zh: chinese.len(),
        });
    }
    if english.is_empty() {
        return Err(ExtractionError::NoPairs);
    }

    Ok(FlattenedPayload {
        original_text,
        english,
        chinese,
    })
}

/// Drives one extraction: prompt the model, normalize and parse its answer,
/// validate purity, and retry exactly once on a validation failure.
pub struct ExtractionPipeline<'a> {
    provider: &'a dyn ChatCompleter,
}

impl<'a> ExtractionPipeline<'a> {
    /// Create a pipeline over the given provider.
    pub fn new(provider: &'a dyn ChatCompleter) -> Self {
        Self { provider }
    }

    /// Extract a validated, line-aligned bilingual corpus from one block of
    /// source text. Makes at most two model calls.
    pub async fn extract(&self, source_text: &str) -> Result<ExtractionResult, ExtractionError> {
        let mut retry_available = true;
        let mut step = ExtractionStep::Requesting {
            prompt: prompts::build_extraction_prompt(source_text),
        };

        loop {
            step = match step {
                ExtractionStep::Requesting { prompt } => {
                    match self
                        .provider
                        .complete_json(prompts::EXTRACTION_SYSTEM_PROMPT, &prompt)
                        .await
                    {
                        Ok(Some(raw)) if !raw.trim().is_empty() => {
                            ExtractionStep::Parsing { raw }
                        }
                        Ok(_) => ExtractionStep::Failed(ExtractionError::EmptyResponse),
                        Err(e) => ExtractionStep::Failed(e.into()),
                    }
                }

                ExtractionStep::Parsing { raw } => {
                    debug!("Raw model response ({} chars): {}", raw.len(), raw);
                    match normalize::parse_model_json(&raw) {
                        Ok(value) => match flatten_payload(&value) {
                            Ok(payload) => ExtractionStep::Validating(payload),
                            Err(e) => ExtractionStep::Failed(e),
                        },
                        Err(e) => ExtractionStep::Failed(ExtractionError::InvalidJson(e)),
                    }
                }

                ExtractionStep::Validating(payload) => {
                    match purity::validate_purity(&payload.english, &payload.chinese) {
                        Ok(()) => ExtractionStep::Accepted(ExtractionResult {
                            original_text: payload.original_text,
                            english_text: payload.english.join("\n"),
                            chinese_text: payload.chinese.join("\n"),
                        }),
                        Err(violation) if retry_available => {
                            ExtractionStep::Retrying { violation }
                        }
                        Err(violation) => {
                            ExtractionStep::Failed(ExtractionError::Validation(violation))
                        }
                    }
                }

                ExtractionStep::Retrying { violation } => {
                    retry_available = false;
                    warn!("Purity validation failed, retrying once: {}", violation);
                    ExtractionStep::Requesting {
                        prompt: prompts::build_retry_prompt(
                            source_text,
                            &violation.retry_instruction(),
                        ),
                    }
                }

                ExtractionStep::Accepted(result) => {
                    debug!(
                        "Extraction accepted with {} aligned lines",
                        result.line_count()
                    );
                    return Ok(result);
                }

                ExtractionStep::Failed(error) => return Err(error),
            };
        }
    }
}
