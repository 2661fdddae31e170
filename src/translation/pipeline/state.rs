/*!
 * Request and per-run state of the translation pipeline.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RequestError;
use crate::language_utils::{self, AUTO_DETECT};
use crate::translation::router::{Approach, Complexity};

/// Translated text reported when no usable translation was produced
pub const FAILED_TRANSLATION: &str = "Translation failed";

/// One translation request, immutable for the duration of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub source_text: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
    pub session_id: String,
}

fn default_source_language() -> String {
    AUTO_DETECT.to_string()
}

fn default_target_language() -> String {
    "es".to_string()
}

impl TranslationRequest {
    /// Create a request with `auto` source and `es` target
    pub fn new(source_text: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            source_language: default_source_language(),
            target_language: default_target_language(),
            session_id: session_id.into(),
        }
    }

    pub fn with_source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = language.into();
        self
    }

    pub fn with_target_language(mut self, language: impl Into<String>) -> Self {
        self.target_language = language.into();
        self
    }

    /// Reject requests that must not enter the pipeline
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.source_text.trim().is_empty() {
            return Err(RequestError::EmptySourceText);
        }
        if self.session_id.trim().is_empty() {
            return Err(RequestError::EmptySessionId);
        }
        if language_utils::validate_source_language(&self.source_language).is_err() {
            return Err(RequestError::InvalidLanguage {
                field: "source",
                code: self.source_language.clone(),
            });
        }
        if language_utils::validate_language_code(&self.target_language).is_err() {
            return Err(RequestError::InvalidLanguage {
                field: "target",
                code: self.target_language.clone(),
            });
        }
        Ok(())
    }
}

/// Which consistency mechanism governs a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextStrategy {
    ConversationAware,
    ConsistencyEnforced,
    Standalone,
}

impl fmt::Display for ContextStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ConversationAware => "conversation_aware",
            Self::ConsistencyEnforced => "consistency_enforced",
            Self::Standalone => "standalone",
        })
    }
}

/// A source segment that was translated before for the same target language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedPhrase {
    pub phrase: String,
    pub target_language: String,
    pub translation: String,
}

impl RepeatedPhrase {
    pub fn new(phrase: &str, target_language: &str, translation: &str) -> Self {
        Self {
            phrase: phrase.to_string(),
            target_language: target_language.to_string(),
            translation: translation.to_string(),
        }
    }
}

/// Glossary term found in the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub term: String,
    pub preferred: String,
}

/// What happens after quality assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    Complete,
    Retry,
    HumanReview,
}

impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Complete => "complete",
            Self::Retry => "retry",
            Self::HumanReview => "human_review",
        })
    }
}

/// Mutable record threaded through every stage of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineState {
    pub request: TranslationRequest,

    // Routing
    pub complexity: Option<Complexity>,
    pub approach: Option<Approach>,

    // Context
    pub context_strategy: Option<ContextStrategy>,
    /// Related prior utterances, most recent last, at most 5
    pub relevant_context: Vec<String>,
    pub repeated_phrases: Vec<RepeatedPhrase>,
    pub glossary_terms: Vec<GlossaryTerm>,

    // Translation
    pub translated_text: String,
    /// Not clamped: the terminology bonus may push it above 1.0
    pub confidence_score: f64,
    pub service_used: Option<String>,
    pub detected_language: Option<String>,

    // Assessment
    /// May fall below 0.0; anything below 0.4 means human review
    pub quality_score: f64,
    pub quality_issues: Vec<String>,
    pub next_action: Option<NextAction>,

    /// Append-only
    pub error_messages: Vec<String>,
    pub retry_count: u32,
}

impl PipelineState {
    /// Fresh state for a request
    pub fn new(request: TranslationRequest) -> Self {
        Self {
            request,
            complexity: None,
            approach: None,
            context_strategy: None,
            relevant_context: Vec::new(),
            repeated_phrases: Vec::new(),
            glossary_terms: Vec::new(),
            translated_text: String::new(),
            confidence_score: 0.0,
            service_used: None,
            detected_language: None,
            quality_score: 0.0,
            quality_issues: Vec::new(),
            next_action: None,
            error_messages: Vec::new(),
            retry_count: 0,
        }
    }

    pub fn source_text(&self) -> &str {
        &self.request.source_text
    }

    pub fn target_language(&self) -> &str {
        &self.request.target_language
    }

    /// Whether the assessor escalated this run to a human
    pub fn needs_human_review(&self) -> bool {
        self.next_action == Some(NextAction::HumanReview)
    }
}
