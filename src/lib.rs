/*!
 * # bicorpus - Bilingual Corpus Extraction Pipeline
 *
 * A Rust library for turning photographed or transcribed English/Chinese
 * study material into a strictly validated, line-aligned bilingual corpus.
 *
 * ## Features
 *
 * - Tolerant parsing of inconsistent model JSON shapes
 * - Per-line language-purity validation with one error-aware retry
 * - Incremental merge of new batches into an accumulated corpus
 * - Positional sentence vs. word/phrase classification
 * - OpenAI-compatible provider client (public API or local server)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `extraction`: Response normalization, pair extraction, and the
 *   orchestrator state machine:
 *   - `extraction::normalize`: Fence stripping and payload isolation
 *   - `extraction::coerce`: Best-effort text coercion of JSON values
 *   - `extraction::pairs`: Shape resolution and pair extraction
 *   - `extraction::orchestrator`: Request/parse/validate/retry driver
 * - `validation`: Language-purity rules and alignment reconciliation
 * - `corpus`: The corpus data model, merge engine, and classifier
 * - `providers`: Chat-completion clients (OpenAI-compatible, mock)
 * - `errors`: Custom error types for the pipeline
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod corpus;
pub mod errors;
pub mod extraction;
pub mod providers;
pub mod validation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use corpus::{BilingualPair, ClassifyPolicy, ExtractionResult, MergeEngine};
pub use errors::{ExtractionError, ProviderError};
pub use extraction::ExtractionPipeline;
pub use validation::{validate_purity, PurityViolation};
