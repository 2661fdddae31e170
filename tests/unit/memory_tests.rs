/*!
 * Tests for conversation memory, the session store and context resolution
 */

use parlance::translation::memory::{CONTEXT_CAPACITY, ConversationMemory, SessionStore};
use parlance::translation::pipeline::state::{ContextStrategy, RepeatedPhrase};
use parlance::translation::resolver;

#[test]
fn test_sessionStore_withTwoSessions_shouldKeepMemoriesApart() {
    let store = SessionStore::new();
    store.update("alice", |memory| memory.commit("Hello", "es", "Hola"));
    store.update("bob", |memory| memory.commit("Hello", "es", "Buenas"));

    assert_eq!(store.len(), 2);
    assert_eq!(
        store.get("alice").unwrap().recall_translation("Hello", "es"),
        Some("Hola")
    );
    assert_eq!(
        store.get("bob").unwrap().recall_translation("Hello", "es"),
        Some("Buenas")
    );
}

#[test]
fn test_sessionStore_clones_shouldShareSessions() {
    let store = SessionStore::new();
    let other = store.clone();

    other.update("s1", |memory| memory.add_term("API", "interfaz"));

    assert_eq!(
        store.get("s1").unwrap().preferred_term("API"),
        Some("interfaz")
    );
}

#[test]
fn test_commit_manyTimes_shouldKeepNewestTenRecords() {
    let mut memory = ConversationMemory::new();
    for i in 0..15 {
        memory.commit(&format!("Sentence {}", i), "es", &format!("Frase {}", i));
    }

    let context = memory.conversation_context();
    assert_eq!(context.len(), CONTEXT_CAPACITY);
    assert_eq!(context[0], "Source: Sentence 5 → Target: Frase 5");
    assert_eq!(context[9], "Source: Sentence 14 → Target: Frase 14");
    assert_eq!(memory.translation_count(), 15);
}

#[test]
fn test_resolve_withRememberedPhrase_shouldEnforceConsistency() {
    let mut memory = ConversationMemory::new();
    memory.remember_translation("Hola", "en", "Hello");

    let resolved = resolver::resolve(&memory, "Hola. Buenos días", "en");

    assert_eq!(resolved.strategy, ContextStrategy::ConsistencyEnforced);
    assert_eq!(resolved.repeated_phrases, vec![RepeatedPhrase::new("Hola", "en", "Hello")]);
}

#[test]
fn test_resolve_withRelatedRecentContext_shouldBeConversationAware() {
    let mut memory = ConversationMemory::new();
    memory.commit("Where is the station", "es", "Dónde está la estación");
    memory.remember_translation("Thanks", "es", "Gracias");

    let resolved = resolver::resolve(&memory, "Thanks. Is the station far?", "es");

    assert_eq!(resolved.strategy, ContextStrategy::ConversationAware);
    assert_eq!(resolved.relevant_context.len(), 1);
    assert_eq!(resolved.repeated_phrases.len(), 1);
}

#[test]
fn test_resolve_withOnlyGlossaryHit_shouldStayStandalone() {
    let mut memory = ConversationMemory::new();
    memory.add_term("database", "base de datos");

    let resolved = resolver::resolve(&memory, "Open the Database", "es");

    assert_eq!(resolved.strategy, ContextStrategy::Standalone);
    assert_eq!(resolved.glossary_terms.len(), 1);
    assert_eq!(resolved.glossary_terms[0].preferred, "base de datos");
}
