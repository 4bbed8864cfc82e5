/*!
 * Error types for the bicorpus pipeline.
 *
 * This module contains custom error types for different parts of the crate,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Fatal pipeline errors carry a Chinese-language, user-facing summary; the
 * structured detail needed to reproduce a failure goes to the log trail,
 * not the error message.
 */

use thiserror::Error;

use crate::validation::purity::PurityViolation;

/// Errors that can occur when talking to a chat-completion service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while extracting or merging bilingual content.
///
/// Only [`ExtractionError::Validation`] is recoverable, and only once, via
/// the orchestrator's retry path. Everything else is fatal for the attempt.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The model returned no content at all
    #[error("AI服务未返回任何内容")]
    EmptyResponse,

    /// The normalized response text is not valid JSON
    #[error("AI返回的内容不是有效的JSON")]
    InvalidJson(#[source] serde_json::Error),

    /// Valid JSON, but no recognized pair or line shape was present
    #[error("AI返回的JSON中没有可识别的中英文配对内容")]
    NoPairs,

    /// The required top-level transcription field is missing or not a string
    #[error("AI返回的JSON缺少原文转写字段")]
    MissingOriginalText,

    /// A line failed language-purity validation
    #[error("提取内容未通过校验: {0}")]
    Validation(PurityViolation),

    /// Aligned line arrays disagree in length after normalization
    #[error("中英文行数不一致 (英文{en}行, 中文{zh}行)")]
    LengthMismatch {
        /// English line count
        en: usize,
        /// Chinese line count
        zh: usize,
    },

    /// A merge response failed parsing or validation; merges are never retried
    #[error("内容合并失败: {0}")]
    MergeFailed(String),

    /// Transport-level failure from the provider client
    #[error("AI服务请求失败")]
    Provider(#[from] ProviderError),
}

impl ExtractionError {
    /// Whether the orchestrator may spend its single retry on this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
