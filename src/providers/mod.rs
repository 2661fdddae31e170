/*!
 * Provider implementations for remote translation services.
 *
 * Every service is reached through the `TranslationProvider` trait, so the
 * pipeline never names a concrete service:
 * - `libretranslate`: LibreTranslate HTTP API
 * - `mock`: scripted provider for tests and offline runs
 * - `cascade`: ordered fallback over several providers
 *
 * `ProviderRegistry` builds a provider from its configuration.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;

pub mod cascade;
pub mod libretranslate;
pub mod mock;

pub use cascade::ProviderCascade;
pub use libretranslate::LibreTranslate;
pub use mock::{MockBehavior, MockProvider};

/// Result of a single provider call
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderTranslation {
    /// The translated text, empty when the service produced nothing
    pub translated_text: String,

    /// Service confidence in the range 0.0 - 1.0
    pub confidence: f64,

    /// Language detected by the service when the source was `auto`
    pub detected_language: Option<String>,

    /// Concrete provider that produced the result, set by composite providers
    pub served_by: Option<String>,
}

impl ProviderTranslation {
    /// Create a translation result without a detected language
    pub fn new(translated_text: impl Into<String>, confidence: f64) -> Self {
        Self {
            translated_text: translated_text.into(),
            confidence,
            detected_language: None,
            served_by: None,
        }
    }

    /// The zero-confidence result used for every soft failure
    pub fn failed() -> Self {
        Self::new(String::new(), 0.0)
    }

    /// Attach the language the service detected
    pub fn with_detected_language(mut self, language: impl Into<String>) -> Self {
        self.detected_language = Some(language.into());
        self
    }

    /// Whether this result counts as a real translation of `source_text`
    pub fn is_usable_for(&self, source_text: &str, min_confidence: f64) -> bool {
        self.confidence > min_confidence
            && !self.translated_text.is_empty()
            && self.translated_text != source_text
    }
}

/// Common trait for all translation providers
///
/// Implementations report failures through `ProviderError`; the caller is
/// responsible for turning them into a soft failure.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Identifier reported as `service_used`
    fn name(&self) -> &str;

    /// Translate `text` from `source_language` (or `auto`) to `target_language`
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<ProviderTranslation, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

/// Constructor stored in the registry
pub type ProviderFactory =
    fn(&ProviderConfig) -> Result<Arc<dyn TranslationProvider>, ProviderError>;

/// Registry mapping provider type names to constructors
pub struct ProviderRegistry {
    factories: HashMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create a registry with the built-in providers
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(libretranslate::PROVIDER_NAME, |config| {
            Ok(Arc::new(LibreTranslate::from_config(config)?) as Arc<dyn TranslationProvider>)
        });
        registry.register(mock::PROVIDER_NAME, |_| {
            Ok(Arc::new(MockProvider::echo_tagged()) as Arc<dyn TranslationProvider>)
        });
        registry
    }

    /// Register or replace a provider constructor
    pub fn register(&mut self, name: &str, factory: ProviderFactory) {
        self.factories.insert(name.to_lowercase(), factory);
    }

    /// Whether a provider type is known
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_lowercase())
    }

    /// Registered provider names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Build the provider described by `config`.
    ///
    /// Configured fallbacks are wrapped, in order, into a `ProviderCascade`
    /// behind the primary provider.
    pub fn build(&self, config: &ProviderConfig) -> Result<Arc<dyn TranslationProvider>, ProviderError> {
        let primary = self.build_single(config)?;
        if config.fallbacks.is_empty() {
            return Ok(primary);
        }

        let mut providers = vec![primary];
        for fallback in &config.fallbacks {
            providers.push(self.build_single(fallback)?);
        }

        Ok(Arc::new(ProviderCascade::new(providers)))
    }

    fn build_single(&self, config: &ProviderConfig) -> Result<Arc<dyn TranslationProvider>, ProviderError> {
        let factory = self
            .factories
            .get(&config.provider_type.to_lowercase())
            .ok_or_else(|| ProviderError::UnknownProvider(config.provider_type.clone()))?;
        factory(config)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
