/*!
 * # Parlance - conversational translation pipeline
 *
 * A Rust library that routes text through a staged translation pipeline and
 * keeps short-lived per-session memory so that repeated phrases and recent
 * utterances translate consistently.
 *
 * ## Features
 *
 * - Complexity routing (long, technical, formal, standard text)
 * - Context resolution against conversation memory and a glossary
 * - Pluggable translation providers:
 *   - LibreTranslate HTTP API
 *   - Mock provider for tests and offline runs
 *   - Ordered fallback cascade
 * - Quality assessment with bounded retry and human-review escalation
 * - Concurrent batch translation
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The pipeline stages:
 *   - `translation::router`: Complexity classification
 *   - `translation::resolver`: Context resolution
 *   - `translation::coordinator`: Provider calls and terminology layering
 *   - `translation::assessor`: Quality scoring
 *   - `translation::pipeline`: Controller and finalizer
 *   - `translation::memory`: Conversation memory and session store
 *   - `translation::batch`: Concurrent batch runs
 * - `providers`: Translation service clients
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ProviderError, RequestError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use providers::{ProviderRegistry, ProviderTranslation, TranslationProvider};
pub use translation::{
    BatchTranslator, PipelineController, PipelineOutcome, SessionStore, TranslationRequest,
    TranslationSummary,
};
