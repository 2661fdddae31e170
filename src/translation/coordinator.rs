/*!
 * Translation coordination.
 *
 * The coordinator makes one bounded provider call per attempt and turns
 * anything that is not a real translation into the `Translation failed`
 * sentinel with zero confidence. Provider errors and timeouts are recorded
 * in the state's error messages and never propagated.
 *
 * On the terminology-focused approach, remembered phrase translations and
 * glossary terms are layered onto the accepted text and confidence gets a
 * flat bonus.
 */

use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{ProviderTranslation, TranslationProvider};
use crate::translation::pipeline::state::{FAILED_TRANSLATION, GlossaryTerm, PipelineState, RepeatedPhrase};
use crate::translation::router::Approach;

/// Confidence a provider result must exceed to be accepted
pub const MIN_ACCEPT_CONFIDENCE: f64 = 0.5;

/// Confidence added on the terminology-focused path, not clamped
pub const TERMINOLOGY_BONUS: f64 = 0.1;

/// Default bound on one provider call
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Calls the provider and post-processes its result
#[derive(Debug, Clone)]
pub struct TranslatorCoordinator {
    provider: Arc<dyn TranslationProvider>,
    timeout: Duration,
}

/// Replace literal occurrences of each phrase with its remembered translation.
///
/// Replacements run in list order, so a later pair can act on text produced
/// by an earlier one.
pub fn apply_terminology_consistency(translation: &str, repeated_phrases: &[RepeatedPhrase]) -> String {
    repeated_phrases
        .iter()
        .filter(|pair| !pair.phrase.is_empty())
        .fold(translation.to_string(), |text, pair| {
            text.replace(&pair.phrase, &pair.translation)
        })
}

/// Replace literal occurrences of glossary terms with their preferred form
pub fn apply_glossary(translation: &str, terms: &[GlossaryTerm]) -> String {
    terms
        .iter()
        .filter(|entry| !entry.term.is_empty())
        .fold(translation.to_string(), |text, entry| {
            text.replace(&entry.term, &entry.preferred)
        })
}

impl TranslatorCoordinator {
    /// Create a coordinator with the default timeout
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Set the bound on a single provider call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The wrapped provider
    pub fn provider(&self) -> &Arc<dyn TranslationProvider> {
        &self.provider
    }

    async fn call_provider(&self, state: &PipelineState) -> Result<ProviderTranslation, ProviderError> {
        let call = self.provider.translate(
            &state.request.source_text,
            &state.request.source_language,
            &state.request.target_language,
        );

        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout)),
        }
    }

    /// Run one translation attempt and write the outcome into `state`.
    ///
    /// Returns a one-line trace message.
    pub async fn translate(&self, state: &mut PipelineState) -> String {
        let result = match self.call_provider(state).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Provider {} failed: {}", self.provider.name(), e);
                state.error_messages.push(e.to_string());
                ProviderTranslation::failed()
            }
        };

        if result.is_usable_for(&state.request.source_text, MIN_ACCEPT_CONFIDENCE) {
            let service = result
                .served_by
                .clone()
                .unwrap_or_else(|| self.provider.name().to_string());
            let mut translated = result.translated_text;
            let mut confidence = result.confidence;

            if state.approach == Some(Approach::TerminologyFocused) {
                translated = apply_terminology_consistency(&translated, &state.repeated_phrases);
                translated = apply_glossary(&translated, &state.glossary_terms);
                confidence += TERMINOLOGY_BONUS;
            }

            state.translated_text = translated;
            state.confidence_score = confidence;
            state.service_used = Some(service);
            if result.detected_language.is_some() {
                state.detected_language = result.detected_language;
            }
        } else {
            debug!(
                "Rejected provider result ({:.2} confidence, {} chars)",
                result.confidence,
                result.translated_text.len()
            );
            state.translated_text = FAILED_TRANSLATION.to_string();
            state.confidence_score = 0.0;
            state.service_used = None;
        }

        format!(
            "Translation: {} produced result with {:.2} confidence",
            state.service_used.as_deref().unwrap_or("none"),
            state.confidence_score
        )
    }
}
