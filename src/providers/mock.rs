/*!
 * Mock provider for tests and offline runs.
 *
 * The mock simulates the behaviours the pipeline has to cope with:
 * - `MockProvider::echo_tagged()` - always "translates" by tagging the text
 * - `MockProvider::fixed(text, confidence)` - always returns the same reply
 * - `MockProvider::scripted(replies)` - returns replies in order, repeating the last
 * - `MockProvider::echo()` - returns the input unchanged
 * - `MockProvider::empty()` / `failing()` / `slow(ms)` - failure modes
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;

use super::{ProviderTranslation, TranslationProvider};

/// Registry name of this provider
pub const PROVIDER_NAME: &str = "mock";

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Returns `[<target>] <text>` with high confidence
    EchoTagged,
    /// Returns the input text unchanged
    Echo,
    /// Always returns the same reply
    Fixed(ProviderTranslation),
    /// Returns replies in order; the last one repeats
    Scripted(Vec<ProviderTranslation>),
    /// Fails every Nth request, otherwise behaves like `EchoTagged`
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty translation with zero confidence
    Empty,
    /// Sleeps before answering like `EchoTagged`
    Slow { delay_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that tags the text with the target language
    pub fn echo_tagged() -> Self {
        Self::new(MockBehavior::EchoTagged)
    }

    /// Create a mock that returns the input unchanged
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create a mock that always returns `text` with `confidence`
    pub fn fixed(text: &str, confidence: f64) -> Self {
        Self::new(MockBehavior::Fixed(ProviderTranslation::new(text, confidence)))
    }

    /// Create a mock returning `replies` in order
    pub fn scripted(replies: Vec<(&str, f64)>) -> Self {
        Self::new(MockBehavior::Scripted(
            replies
                .into_iter()
                .map(|(text, confidence)| ProviderTranslation::new(text, confidence))
                .collect(),
        ))
    }

    /// Create an intermittently failing mock provider
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock that answers after `delay_ms`
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of translate calls received so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn tagged(text: &str, target_language: &str) -> ProviderTranslation {
        ProviderTranslation::new(format!("[{}] {}", target_language, text), 0.9)
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            request_count: Arc::clone(&self.request_count),
        }
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<ProviderTranslation, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::EchoTagged => Ok(Self::tagged(text, target_language)),

            MockBehavior::Echo => Ok(ProviderTranslation::new(text, 0.9)),

            MockBehavior::Fixed(reply) => Ok(reply.clone()),

            MockBehavior::Scripted(replies) => replies
                .get(count)
                .or_else(|| replies.last())
                .cloned()
                .ok_or_else(|| ProviderError::RequestFailed("Mock script is empty".to_string())),

            MockBehavior::Intermittent { fail_every } => {
                if *fail_every > 0 && count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(Self::tagged(text, target_language))
                }
            }

            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),

            MockBehavior::Empty => Ok(ProviderTranslation::failed()),

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(Self::tagged(text, target_language))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => Err(ProviderError::ConnectionError("Simulated outage".to_string())),
            _ => Ok(()),
        }
    }
}
