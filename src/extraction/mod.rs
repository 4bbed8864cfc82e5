/*!
 * Bilingual extraction from raw model responses.
 *
 * This module turns a model's free-form, occasionally malformed output into
 * validated, line-aligned bilingual content. It is split into several
 * submodules:
 *
 * - `normalize`: strips fences and commentary to isolate the JSON payload
 * - `coerce`: best-effort coercion of non-string JSON values into pair text
 * - `pairs`: shape resolution and tolerant pair extraction
 * - `prompts`: prompt templates for extraction, retry, and merge requests
 * - `orchestrator`: the state machine driving one extraction attempt
 */

pub mod coerce;
pub mod normalize;
pub mod orchestrator;
pub mod pairs;
pub mod prompts;

// Re-export main types
pub use orchestrator::ExtractionPipeline;
pub use pairs::PairShape;
