/*!
 * Scripted mock provider for exercising the pipeline without a live service.
 *
 * The mock replays a fixed queue of replies, one per call, and records every
 * prompt it receives. That makes call-count invariants (such as the
 * bounded-retry policy) directly observable in tests.
 */

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::ChatCompleter;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text as the completion content
    Content(String),
    /// Simulate a service that answered with no content
    NoContent,
    /// Simulate a transport failure
    Fail(String),
}

/// Scripted chat provider for tests
#[derive(Debug)]
pub struct MockChatProvider {
    /// Remaining scripted replies, consumed front to back
    replies: Mutex<VecDeque<MockReply>>,
    /// Number of completed calls
    calls: AtomicUsize,
    /// Captured (system, user) prompt pairs, in call order
    prompts: Mutex<Vec<(String, String)>>,
}

impl MockChatProvider {
    /// Create a provider that replays the given replies in order.
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider that returns the given content strings in order.
    pub fn scripted<S: AsRef<str>>(contents: &[S]) -> Self {
        Self::new(
            contents
                .iter()
                .map(|c| MockReply::Content(c.as_ref().to_string()))
                .collect(),
        )
    }

    /// Create a provider whose first reply carries no content.
    pub fn empty() -> Self {
        Self::new(vec![MockReply::NoContent])
    }

    /// Create a provider whose first reply is a transport failure.
    pub fn failing(message: &str) -> Self {
        Self::new(vec![MockReply::Fail(message.to_string())])
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The (system, user) prompts received so far.
    pub fn recorded_prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().expect("prompt lock poisoned").clone()
    }
}

#[async_trait]
impl ChatCompleter for MockChatProvider {
    async fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<Option<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompt lock poisoned")
            .push((system_prompt.to_string(), user_prompt.to_string()));

        let reply = self
            .replies
            .lock()
            .expect("reply lock poisoned")
            .pop_front();

        match reply {
            Some(MockReply::Content(text)) => Ok(Some(text)),
            Some(MockReply::NoContent) => Ok(None),
            Some(MockReply::Fail(message)) => Err(ProviderError::RequestFailed(message)),
            None => Err(ProviderError::RequestFailed(
                "mock reply queue exhausted".to_string(),
            )),
        }
    }
}
