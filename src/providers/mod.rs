/*!
 * Provider clients for chat-completion model services.
 *
 * This module contains the completion contract the pipeline depends on and
 * its implementations:
 * - OpenAI-compatible API client (also covers self-hosted LM Studio servers)
 * - Scripted mock provider for tests and offline runs
 */

use std::fmt::Debug;

use async_trait::async_trait;

use crate::errors::ProviderError;

/// The completion contract between the pipeline and a model service.
///
/// Given a system prompt and a user prompt, the provider returns the model's
/// free-form text content with a JSON response-format hint applied.
/// `Ok(None)` means the service answered but produced no content; the
/// pipeline treats that as an immediate hard failure.
#[async_trait]
pub trait ChatCompleter: Send + Sync + Debug {
    /// Request a JSON-formatted completion.
    async fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Option<String>, ProviderError>;
}

pub mod mock;
pub mod openai;

// Re-export main types
pub use mock::MockChatProvider;
pub use openai::OpenAiClient;
