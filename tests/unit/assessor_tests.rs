/*!
 * Tests for quality assessment
 */

use parlance::translation::assessor::{assess, select_action};
use parlance::translation::pipeline::state::{FAILED_TRANSLATION, NextAction, RepeatedPhrase};

#[test]
fn test_assess_withSpanishGreeting_shouldCompleteWithoutIssues() {
    let assessment = assess("Hello, how are you today?", "Hola, ¿cómo estás hoy?", 0.9, &[]);

    assert!(assessment.quality_issues.is_empty());
    assert_eq!(assessment.quality_score, 0.9);
    assert_eq!(assessment.next_action, NextAction::Complete);
}

#[test]
fn test_assess_withConfidenceInRetryBand_shouldRetry() {
    let assessment = assess("Hello, how are you today?", "Hola, ¿cómo estás hoy?", 0.45, &[]);

    assert_eq!(assessment.next_action, NextAction::Retry);
}

#[test]
fn test_assess_withFailureAndEverySmell_shouldStackPenalties() {
    let phrases = vec![RepeatedPhrase::new("Translation", "es", "Traducción")];

    // Source words copied, failed sentinel, phrase translation missing
    let assessment = assess("Translation failed badly", FAILED_TRANSLATION, 0.9, &phrases);

    assert_eq!(
        assessment.quality_issues,
        vec![
            "Translation completely failed",
            "Possibly untranslated words: Translation, failed",
            "Terminology inconsistency: Translation",
        ]
    );
    assert!((assessment.quality_score + 0.25).abs() < 1e-6);
    assert_eq!(assessment.next_action, NextAction::HumanReview);
}

#[test]
fn test_assess_withPhraseNotInSource_shouldIgnoreIt() {
    let phrases = vec![RepeatedPhrase::new("Goodbye", "es", "Adiós")];

    let assessment = assess("Hello friend", "Hola amigo", 0.8, &phrases);

    assert!(assessment.quality_issues.is_empty());
}

#[test]
fn test_assess_withRatioExactlyAtBounds_shouldNotPenalize() {
    // 3 / 10 and 30 / 10
    let short = assess("abcdefghij", "xyz", 0.8, &[]);
    let long = assess("abcdefghij", &"x".repeat(30), 0.8, &[]);

    assert!(short.quality_issues.is_empty());
    assert!(long.quality_issues.is_empty());
}

#[test]
fn test_selectAction_withRawScoreAboveOne_shouldComplete() {
    assert_eq!(select_action(1.05), NextAction::Complete);
}
