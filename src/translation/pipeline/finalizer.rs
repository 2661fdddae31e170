/*!
 * Final stage of a pipeline run.
 *
 * A completed run is committed to the session's conversation memory; a run
 * escalated to human review leaves memory untouched and reports its issues
 * instead of the translation.
 */

use log::info;
use serde::Serialize;
use std::fmt;

use crate::translation::memory::SessionStore;

use super::state::{NextAction, PipelineState};

/// Prefix of the output reported for runs that need review
pub const REVIEW_PREFIX: &str = "Translation quality issues detected: ";

/// Terminal status reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalStatus {
    Completed,
    NeedsReview,
}

impl fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Completed => "completed",
            Self::NeedsReview => "needs_review",
        })
    }
}

/// User-facing result of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationSummary {
    /// The translation, or the issue report when review is needed
    pub translation: String,
    /// Raw quality score clamped into [0, 1]
    pub quality_score: f64,
    pub service_used: Option<String>,
    pub status: FinalStatus,
    /// `None` when no issue was found
    pub issues: Option<Vec<String>>,
}

impl TranslationSummary {
    pub fn is_completed(&self) -> bool {
        self.status == FinalStatus::Completed
    }
}

/// Build the summary and commit memory when the run completed.
///
/// Returns the summary and a one-line trace message.
pub fn finalize(state: &PipelineState, store: &SessionStore) -> (TranslationSummary, String) {
    let (status, translation) = if state.next_action == Some(NextAction::Complete) {
        store.update(&state.request.session_id, |memory| {
            memory.commit(
                &state.request.source_text,
                &state.request.target_language,
                &state.translated_text,
            )
        });
        info!(
            "Committed translation to session {} ({} chars)",
            state.request.session_id,
            state.translated_text.chars().count()
        );
        (FinalStatus::Completed, state.translated_text.clone())
    } else {
        (
            FinalStatus::NeedsReview,
            format!("{}{}", REVIEW_PREFIX, state.quality_issues.join(", ")),
        )
    };

    let summary = TranslationSummary {
        translation,
        quality_score: state.quality_score.clamp(0.0, 1.0),
        service_used: state.service_used.clone(),
        status,
        issues: (!state.quality_issues.is_empty()).then(|| state.quality_issues.clone()),
    };

    let message = format!("Finalizer: {} - Quality: {:.2}", status, state.quality_score);
    (summary, message)
}
