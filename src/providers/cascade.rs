/*!
 * Ordered fallback over several providers.
 *
 * The cascade asks each provider in turn and stops at the first result that
 * is a real translation. When none qualifies, the highest-confidence result
 * is returned so the caller can still judge it.
 */

use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use crate::errors::ProviderError;

use super::{ProviderTranslation, TranslationProvider};

/// Name reported by the cascade itself
pub const PROVIDER_NAME: &str = "cascade";

/// Confidence a result must exceed to stop the cascade
const ACCEPT_CONFIDENCE: f64 = 0.5;

/// Provider that falls back through a list of providers
#[derive(Debug, Clone)]
pub struct ProviderCascade {
    providers: Vec<Arc<dyn TranslationProvider>>,
}

impl ProviderCascade {
    /// Create a cascade trying `providers` in order
    pub fn new(providers: Vec<Arc<dyn TranslationProvider>>) -> Self {
        Self { providers }
    }

    /// Number of providers in the cascade
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the cascade has no providers
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[async_trait]
impl TranslationProvider for ProviderCascade {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<ProviderTranslation, ProviderError> {
        let mut best: Option<ProviderTranslation> = None;
        let mut last_error = None;

        for provider in &self.providers {
            match provider.translate(text, source_language, target_language).await {
                Ok(mut translation) => {
                    translation.served_by = Some(provider.name().to_string());
                    if translation.is_usable_for(text, ACCEPT_CONFIDENCE) {
                        return Ok(translation);
                    }
                    debug!(
                        "Cascade: {} returned unusable result ({:.2} confidence), trying next",
                        provider.name(),
                        translation.confidence
                    );
                    let better = best
                        .as_ref()
                        .is_none_or(|current| translation.confidence > current.confidence);
                    if better {
                        best = Some(translation);
                    }
                }
                Err(e) => {
                    warn!("Cascade: {} failed: {}", provider.name(), e);
                    last_error = Some(e);
                }
            }
        }

        match (best, last_error) {
            (Some(translation), _) => Ok(translation),
            (None, Some(error)) => Err(error),
            (None, None) => Err(ProviderError::RequestFailed("Cascade has no providers".to_string())),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let mut last_error = None;
        for provider in &self.providers {
            match provider.test_connection().await {
                Ok(()) => return Ok(()),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| ProviderError::RequestFailed("Cascade has no providers".to_string())))
    }
}
