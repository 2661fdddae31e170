use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use crate::language_utils::normalize_for_service;

use super::{ProviderTranslation, TranslationProvider};

/// Registry name of this provider
pub const PROVIDER_NAME: &str = "libretranslate";

/// LibreTranslate client
#[derive(Debug)]
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the service, without the `/translate` path
    endpoint: String,
    /// Optional API key, required by the public instance
    api_key: Option<String>,
    /// Confidence reported when the service does not return one
    default_confidence: f64,
    /// Request timeout in seconds
    timeout_secs: u64,
}

/// Translate request body
#[derive(Debug, Serialize)]
pub struct LibreTranslateRequest {
    /// Text to translate
    pub q: String,
    /// Source language code or `auto`
    pub source: String,
    /// Target language code
    pub target: String,
    /// Input format
    pub format: String,
    /// API key, omitted for self-hosted instances
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Language detection block returned when the source is `auto`
#[derive(Debug, Deserialize)]
pub struct DetectedLanguage {
    /// Detection confidence, 0 - 100
    pub confidence: f64,
    /// Detected language code
    pub language: String,
}

/// Translate response body
#[derive(Debug, Deserialize)]
pub struct LibreTranslateResponse {
    /// The translated text
    #[serde(rename = "translatedText", default)]
    pub translated_text: String,
    /// Present only when the source language was detected
    #[serde(rename = "detectedLanguage", default)]
    pub detected_language: Option<DetectedLanguage>,
}

/// Error body returned with non-success status codes
#[derive(Debug, Deserialize)]
struct LibreTranslateError {
    error: String,
}

impl LibreTranslateRequest {
    /// Create a plain-text request
    pub fn new(text: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            q: text.into(),
            source: source.into(),
            target: target.into(),
            format: "text".to_string(),
            api_key: None,
        }
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

impl LibreTranslateResponse {
    /// Convert into a provider result.
    ///
    /// The detection confidence (0 - 100) is scaled to 0.0 - 1.0; without
    /// detection the configured default applies.
    pub fn into_translation(self, default_confidence: f64) -> ProviderTranslation {
        match self.detected_language {
            Some(detected) => ProviderTranslation::new(
                self.translated_text,
                (detected.confidence / 100.0).clamp(0.0, 1.0),
            )
            .with_detected_language(detected.language),
            None => ProviderTranslation::new(self.translated_text, default_confidence),
        }
    }
}

impl LibreTranslate {
    /// Create a new client
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout_secs: u64, default_confidence: f64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
            default_confidence,
            timeout_secs,
        }
    }

    /// Create a client from provider configuration
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        if config.endpoint.trim().is_empty() {
            return Err(ProviderError::ConnectionError(
                "LibreTranslate endpoint is not configured".to_string(),
            ));
        }

        Ok(Self::new(
            config.endpoint.clone(),
            Some(config.api_key.clone()),
            config.timeout_secs,
            config.default_confidence,
        ))
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), path)
    }

    /// Send a translate request
    pub async fn complete(&self, request: LibreTranslateRequest) -> Result<LibreTranslateResponse, ProviderError> {
        let response = self
            .client
            .post(self.api_url("translate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(Duration::from_secs(self.timeout_secs))
                } else if e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            let message = serde_json::from_str::<LibreTranslateError>(&error_text)
                .map(|body| body.error)
                .unwrap_or(error_text);
            error!("LibreTranslate API error ({}): {}", status, message);

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimitExceeded(message));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<LibreTranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslate {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<ProviderTranslation, ProviderError> {
        let source = normalize_for_service(source_language)
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        let target = normalize_for_service(target_language)
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let mut request = LibreTranslateRequest::new(text, source, target);
        if let Some(api_key) = &self.api_key {
            request = request.api_key(api_key.clone());
        }

        debug!("LibreTranslate request {} -> {} ({} chars)", request.source, request.target, text.len());
        let response = self.complete(request).await?;

        Ok(response.into_translation(self.default_confidence))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(self.api_url("languages"))
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError {
                status_code: response.status().as_u16(),
                message: "Language listing failed".to_string(),
            })
        }
    }
}
