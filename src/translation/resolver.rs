/*!
 * Context resolution against conversation memory.
 *
 * Two independent lookups feed the context strategy:
 * - relevant context: recent conversation records sharing a word with the text
 * - repeated phrases: sentences of the text already in translation memory
 *
 * Conversation awareness takes precedence over consistency enforcement.
 */

use crate::translation::memory::ConversationMemory;
use crate::translation::pipeline::state::{ContextStrategy, GlossaryTerm, RepeatedPhrase};

/// Number of most recent context records inspected
pub const CONTEXT_LOOKBACK: usize = 5;

/// Everything the resolver found for one text
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContext {
    pub strategy: ContextStrategy,
    pub relevant_context: Vec<String>,
    pub repeated_phrases: Vec<RepeatedPhrase>,
    pub glossary_terms: Vec<GlossaryTerm>,
}

/// Records among the last five whose lower-cased words occur in the text.
///
/// Order is preserved and nothing is deduplicated.
pub fn relevant_context(memory: &ConversationMemory, source_text: &str) -> Vec<String> {
    let lowered = source_text.to_lowercase();

    memory
        .recent_context(CONTEXT_LOOKBACK)
        .iter()
        .filter(|record| {
            record
                .split_whitespace()
                .any(|token| lowered.contains(&token.to_lowercase()))
        })
        .cloned()
        .collect()
}

/// Sentences of the text with a remembered translation for `target_language`
pub fn repeated_phrases(memory: &ConversationMemory, source_text: &str, target_language: &str) -> Vec<RepeatedPhrase> {
    source_text
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| {
            memory
                .recall_translation(segment, target_language)
                .map(|translation| RepeatedPhrase::new(segment, target_language, translation))
        })
        .collect()
}

/// Glossary terms occurring in the text, case-insensitively, sorted by term
pub fn glossary_terms(memory: &ConversationMemory, source_text: &str) -> Vec<GlossaryTerm> {
    let lowered = source_text.to_lowercase();

    let mut terms: Vec<GlossaryTerm> = memory
        .glossary()
        .filter(|(term, _)| !term.is_empty() && lowered.contains(&term.to_lowercase()))
        .map(|(term, preferred)| GlossaryTerm {
            term: term.to_string(),
            preferred: preferred.to_string(),
        })
        .collect();
    terms.sort_by(|a, b| a.term.cmp(&b.term));
    terms
}

/// Pick the strategy label from the two lookups
pub fn context_strategy(relevant_context: &[String], repeated_phrases: &[RepeatedPhrase]) -> ContextStrategy {
    if !relevant_context.is_empty() {
        ContextStrategy::ConversationAware
    } else if !repeated_phrases.is_empty() {
        ContextStrategy::ConsistencyEnforced
    } else {
        ContextStrategy::Standalone
    }
}

/// Run all lookups against a memory snapshot
pub fn resolve(memory: &ConversationMemory, source_text: &str, target_language: &str) -> ResolvedContext {
    let relevant_context = relevant_context(memory, source_text);
    let repeated_phrases = repeated_phrases(memory, source_text, target_language);
    let glossary_terms = glossary_terms(memory, source_text);

    ResolvedContext {
        strategy: context_strategy(&relevant_context, &repeated_phrases),
        relevant_context,
        repeated_phrases,
        glossary_terms,
    }
}
