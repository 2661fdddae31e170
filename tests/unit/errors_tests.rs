/*!
 * Tests for error types and conversions
 */

use std::time::Duration;

use parlance::errors::{AppError, ProviderError, RequestError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 400,
        message: "Invalid request".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("400"));
    assert!(display.contains("Invalid request"));
}

#[test]
fn test_providerError_timeout_shouldShowDuration() {
    let error = ProviderError::Timeout(Duration::from_millis(250));
    assert_eq!(error.to_string(), "Provider timed out after 250ms");
}

#[test]
fn test_requestError_batchTooLarge_shouldNameLimit() {
    let error = RequestError::BatchTooLarge { size: 51, limit: 50 };
    assert_eq!(
        error.to_string(),
        "Batch size 51 exceeds maximum limit of 50 texts"
    );
}

#[test]
fn test_requestError_invalidLanguage_shouldNameField() {
    let error = RequestError::InvalidLanguage {
        field: "target",
        code: "xx".to_string(),
    };
    assert_eq!(error.to_string(), "Invalid target language code: 'xx'");
}

#[test]
fn test_appError_fromProviderError_shouldWrapCorrectly() {
    let app_error: AppError = ProviderError::UnknownProvider("deepl".to_string()).into();

    assert!(matches!(app_error, AppError::Provider(_)));
    assert!(app_error.to_string().contains("Unknown provider: deepl"));
}

#[test]
fn test_appError_fromRequestError_shouldWrapCorrectly() {
    let app_error: AppError = RequestError::EmptySourceText.into();
    assert!(matches!(app_error, AppError::Request(RequestError::EmptySourceText)));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "conf.json missing");
    let app_error: AppError = io_error.into();

    assert!(matches!(app_error, AppError::File(_)));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let app_error: AppError = anyhow::anyhow!("boom").into();
    assert_eq!(app_error.to_string(), "Unknown error: boom");
}
