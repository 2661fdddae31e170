/*!
 * Quality assessment of a translation attempt.
 *
 * The score starts at the attempt's confidence and every matching check
 * applies, in order:
 * - failed or empty translation: score forced to 0.0
 * - length ratio outside 0.3 - 3.0: -0.2
 * - more than one of the first three source words copied verbatim: -0.1
 * - each remembered phrase whose translation is missing: -0.15
 *
 * The score then selects exactly one action from three contiguous bands.
 */

use crate::translation::pipeline::state::{FAILED_TRANSLATION, NextAction, PipelineState, RepeatedPhrase};

/// Lowest score that completes a translation
pub const COMPLETE_THRESHOLD: f64 = 0.6;

/// Lowest score that earns another attempt instead of human review
pub const RETRY_THRESHOLD: f64 = 0.4;

/// Accepted range of translated/source length
pub const MIN_LENGTH_RATIO: f64 = 0.3;
pub const MAX_LENGTH_RATIO: f64 = 3.0;

pub const LENGTH_PENALTY: f64 = 0.2;
pub const UNTRANSLATED_PENALTY: f64 = 0.1;
pub const TERMINOLOGY_PENALTY: f64 = 0.15;

/// Number of leading source words checked for untranslated copies
const LEADING_WORDS: usize = 3;

/// Outcome of one assessment
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Not clamped; may be negative
    pub quality_score: f64,
    pub quality_issues: Vec<String>,
    pub next_action: NextAction,
}

impl Assessment {
    pub fn needs_human_review(&self) -> bool {
        self.next_action == NextAction::HumanReview
    }
}

/// Map a score onto its action band
pub fn select_action(quality_score: f64) -> NextAction {
    if quality_score >= COMPLETE_THRESHOLD {
        NextAction::Complete
    } else if quality_score >= RETRY_THRESHOLD {
        NextAction::Retry
    } else {
        NextAction::HumanReview
    }
}

/// Translated length over source length, in characters; 0 for empty source
pub fn length_ratio(source_text: &str, translated_text: &str) -> f64 {
    let source_len = source_text.chars().count();
    if source_len == 0 {
        return 0.0;
    }
    translated_text.chars().count() as f64 / source_len as f64
}

/// Leading source words that appear verbatim in the translation
pub fn untranslated_words<'a>(source_text: &'a str, translated_text: &str) -> Vec<&'a str> {
    source_text
        .split_whitespace()
        .take(LEADING_WORDS)
        .filter(|word| translated_text.contains(word))
        .collect()
}

/// Score a translation
pub fn assess(
    source_text: &str,
    translated_text: &str,
    confidence_score: f64,
    repeated_phrases: &[RepeatedPhrase],
) -> Assessment {
    let mut quality_issues = Vec::new();
    let mut quality_score = confidence_score;

    if translated_text.is_empty() || translated_text == FAILED_TRANSLATION {
        quality_issues.push("Translation completely failed".to_string());
        quality_score = 0.0;
    }

    let ratio = length_ratio(source_text, translated_text);
    if !(MIN_LENGTH_RATIO..=MAX_LENGTH_RATIO).contains(&ratio) {
        quality_issues.push("Suspicious length difference".to_string());
        quality_score -= LENGTH_PENALTY;
    }

    let copied = untranslated_words(source_text, translated_text);
    if copied.len() > 1 {
        quality_issues.push(format!("Possibly untranslated words: {}", copied.join(", ")));
        quality_score -= UNTRANSLATED_PENALTY;
    }

    for pair in repeated_phrases {
        if source_text.contains(&pair.phrase) && !translated_text.contains(&pair.translation) {
            quality_issues.push(format!("Terminology inconsistency: {}", pair.phrase));
            quality_score -= TERMINOLOGY_PENALTY;
        }
    }

    Assessment {
        quality_score,
        next_action: select_action(quality_score),
        quality_issues,
    }
}

/// Assess the current attempt and write the verdict into `state`.
///
/// Returns a one-line trace message.
pub fn assess_state(state: &mut PipelineState) -> String {
    let assessment = assess(
        &state.request.source_text,
        &state.translated_text,
        state.confidence_score,
        &state.repeated_phrases,
    );

    state.quality_score = assessment.quality_score;
    state.quality_issues = assessment.quality_issues;
    state.next_action = Some(assessment.next_action);

    format!(
        "QA: Quality score {:.2}, action: {}",
        assessment.quality_score, assessment.next_action
    )
}
