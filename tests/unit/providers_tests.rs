/*!
 * Tests for provider implementations and the provider registry
 */

use std::sync::Arc;

use parlance::app_config::ProviderConfig;
use parlance::errors::ProviderError;
use parlance::providers::{
    MockBehavior, MockProvider, ProviderCascade, ProviderRegistry, ProviderTranslation,
    TranslationProvider,
};

fn mock_config() -> ProviderConfig {
    ProviderConfig {
        provider_type: "mock".to_string(),
        ..ProviderConfig::default()
    }
}

#[test]
fn test_registry_build_withMockType_shouldTranslate() {
    let provider = ProviderRegistry::with_defaults().build(&mock_config()).unwrap();

    let result = tokio_test::block_on(provider.translate("Hello", "auto", "de")).unwrap();

    assert_eq!(provider.name(), "mock");
    assert_eq!(result.translated_text, "[de] Hello");
}

#[test]
fn test_registry_build_withMixedCaseType_shouldResolve() {
    let mut config = mock_config();
    config.provider_type = "MOCK".to_string();

    assert!(ProviderRegistry::with_defaults().build(&config).is_ok());
}

#[test]
fn test_registry_register_shouldOverrideFactory() {
    let mut registry = ProviderRegistry::empty();
    registry.register("mock", |_| {
        Ok(Arc::new(MockProvider::fixed("fijo", 0.7)) as Arc<dyn TranslationProvider>)
    });

    let provider = registry.build(&mock_config()).unwrap();
    let result = tokio_test::block_on(provider.translate("fixed", "en", "es")).unwrap();

    assert_eq!(result.translated_text, "fijo");
    assert_eq!(registry.names(), vec!["mock".to_string()]);
}

#[test]
fn test_registry_build_withUnknownFallback_shouldFail() {
    let mut config = mock_config();
    config.fallbacks.push(ProviderConfig {
        provider_type: "babelfish".to_string(),
        ..ProviderConfig::default()
    });

    let error = ProviderRegistry::with_defaults().build(&config).unwrap_err();
    assert!(matches!(error, ProviderError::UnknownProvider(name) if name == "babelfish"));
}

#[test]
fn test_cascade_shouldReportServingProvider() {
    let cascade = ProviderCascade::new(vec![
        Arc::new(MockProvider::empty()),
        Arc::new(MockProvider::fixed("Hola", 0.9)),
    ]);

    let result = tokio_test::block_on(cascade.translate("Hello", "en", "es")).unwrap();

    assert_eq!(result.translated_text, "Hola");
    assert_eq!(result.served_by.as_deref(), Some("mock"));
}

#[test]
fn test_cascade_withErrorThenWeakResult_shouldReturnWeakResult() {
    let cascade = ProviderCascade::new(vec![
        Arc::new(MockProvider::failing()),
        Arc::new(MockProvider::fixed("Hola", 0.3)),
    ]);

    let result = tokio_test::block_on(cascade.translate("Hello", "en", "es")).unwrap();

    assert_eq!(result.confidence, 0.3);
}

#[test]
fn test_mockProvider_withFixedDetection_shouldCarryDetectedLanguage() {
    let reply = ProviderTranslation::new("Hello", 0.95).with_detected_language("es");
    let provider = MockProvider::new(MockBehavior::Fixed(reply));

    let result = tokio_test::block_on(provider.translate("Hola", "auto", "en")).unwrap();

    assert_eq!(result.detected_language.as_deref(), Some("es"));
    assert_eq!(provider.call_count(), 1);
}
