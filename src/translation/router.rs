/*!
 * Request routing.
 *
 * The router tags each text with a complexity class and the translation
 * approach downstream stages should take. Rules are checked in order and the
 * first match wins:
 * 1. more than 100 words: `high` / `paragraph_by_paragraph`
 * 2. a technical term: `technical` / `terminology_focused`
 * 3. a formal phrase: `formal` / `style_preserved`
 * 4. anything else: `standard` / `direct_translation`
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Word count above which a text is treated as long-form
pub const LONG_TEXT_WORD_LIMIT: usize = 100;

/// Terms marking technical content (matched case-insensitively as substrings)
pub const TECHNICAL_TERMS: &[&str] = &["api", "database", "algorithm", "function"];

/// Phrases marking formal register (matched case-insensitively as substrings)
pub const FORMAL_PHRASES: &[&str] = &["dear sir", "sincerely", "respectfully"];

/// Complexity class assigned by the router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    High,
    Technical,
    Formal,
    Standard,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Technical => "technical",
            Self::Formal => "formal",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Translation approach steering the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Approach {
    ParagraphByParagraph,
    TerminologyFocused,
    StylePreserved,
    DirectTranslation,
}

impl Approach {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParagraphByParagraph => "paragraph_by_paragraph",
            Self::TerminologyFocused => "terminology_focused",
            Self::StylePreserved => "style_preserved",
            Self::DirectTranslation => "direct_translation",
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing decision for one text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub complexity: Complexity,
    pub approach: Approach,
}

impl Route {
    fn new(complexity: Complexity, approach: Approach) -> Self {
        Self { complexity, approach }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Route a source text. Pure and deterministic.
pub fn route(text: &str) -> Route {
    if text.split_whitespace().count() > LONG_TEXT_WORD_LIMIT {
        return Route::new(Complexity::High, Approach::ParagraphByParagraph);
    }

    let lowered = text.to_lowercase();
    if contains_any(&lowered, TECHNICAL_TERMS) {
        Route::new(Complexity::Technical, Approach::TerminologyFocused)
    } else if contains_any(&lowered, FORMAL_PHRASES) {
        Route::new(Complexity::Formal, Approach::StylePreserved)
    } else {
        Route::new(Complexity::Standard, Approach::DirectTranslation)
    }
}
