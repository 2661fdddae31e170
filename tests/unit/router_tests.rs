/*!
 * Tests for complexity routing
 */

use parlance::translation::router::{Approach, Complexity, LONG_TEXT_WORD_LIMIT, route};

#[test]
fn test_route_withUppercaseTechnicalTerm_shouldMatchCaseInsensitively() {
    let result = route("Restart the DATABASE before noon");
    assert_eq!(result.complexity, Complexity::Technical);
    assert_eq!(result.approach, Approach::TerminologyFocused);
}

#[test]
fn test_route_withClosingFormula_shouldBeFormal() {
    let result = route("Thank you for your patience. Sincerely, the team");
    assert_eq!(result.complexity, Complexity::Formal);
    assert_eq!(result.approach, Approach::StylePreserved);
}

#[test]
fn test_route_withEmbeddedTerm_shouldMatchAsSubstring() {
    // "rapid" contains "api"
    let result = route("A rapid response");
    assert_eq!(result.complexity, Complexity::Technical);
}

#[test]
fn test_route_withManyShortWords_shouldBeHighComplexity() {
    let text = vec!["word"; LONG_TEXT_WORD_LIMIT + 1].join(" ");
    let result = route(&text);
    assert_eq!(result.complexity, Complexity::High);
    assert_eq!(result.approach, Approach::ParagraphByParagraph);
}

#[test]
fn test_route_withIrregularWhitespace_shouldCountWordsOnly() {
    let text = vec!["word"; LONG_TEXT_WORD_LIMIT].join(" \n\t ");
    assert_eq!(route(&text).complexity, Complexity::Standard);
}

#[test]
fn test_route_withEmptyText_shouldBeStandard() {
    let result = route("");
    assert_eq!(result.complexity, Complexity::Standard);
    assert_eq!(result.approach, Approach::DirectTranslation);
}
