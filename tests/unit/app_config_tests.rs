/*!
 * Tests for application configuration
 */

use parlance::app_config::{Config, LogLevel, ProviderConfig};
use parlance::errors::AppError;

use crate::common;

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefault() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.target_language, "es");
    let reloaded = Config::from_file(&path).unwrap();
    assert_eq!(reloaded.provider.provider_type, "libretranslate");
    assert_eq!(reloaded.pipeline, config.pipeline);
}

#[test]
fn test_fromFile_withFallbacks_shouldParseNestedProviders() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{
            "source_language": "en",
            "target_language": "de",
            "provider": {
                "type": "libretranslate",
                "endpoint": "http://localhost:5000/",
                "fallbacks": [{"type": "mock"}]
            },
            "pipeline": {"max_attempts": 2},
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.provider.fallbacks.len(), 1);
    assert_eq!(config.provider.fallbacks[0].provider_type, "mock");
    assert_eq!(config.pipeline.max_attempts, 2);
    assert_eq!(config.pipeline.max_batch_size, 50);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
}

#[test]
fn test_fromFile_withMalformedJson_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_validate_withInvalidTargetLanguage_shouldFail() {
    let mut config = Config::default();
    config.target_language = "klingon".to_string();

    let error = config.validate().unwrap_err();
    assert!(matches!(error, AppError::Config(_)));
    assert!(error.to_string().contains("Invalid target language 'klingon'"));
}

#[test]
fn test_validate_withZeroAttempts_shouldFail() {
    let mut config = Config::default();
    config.pipeline.max_attempts = 0;

    let error = config.validate().unwrap_err();
    assert_eq!(error.to_string(), "Configuration error: max_attempts must be at least 1");
}

#[test]
fn test_validate_withBadFallbackEndpoint_shouldFail() {
    let mut config = Config::default();
    let mut fallback = ProviderConfig::default();
    fallback.endpoint = "not a url".to_string();
    config.provider.fallbacks.push(fallback);

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withOutOfRangeConfidence_shouldFail() {
    let mut config = Config::default();
    config.provider.default_confidence = 1.5;

    assert!(config.validate().is_err());
}

#[test]
fn test_logLevel_shouldMapToFilter() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
}
