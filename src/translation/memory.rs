/*!
 * Per-session conversation memory.
 *
 * A `ConversationMemory` remembers what a session already translated:
 * - translation memory: exact (source text, target language) pairs
 * - conversation context: the 10 most recent "source → target" records
 * - terminology glossary: preferred translations for terms
 * - session topic label
 *
 * `SessionStore` owns one memory per session and serializes writers per
 * session, so concurrent pipeline runs in the same session never interleave
 * a read-modify-write.
 */

use log::debug;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum number of records kept in the conversation context
pub const CONTEXT_CAPACITY: usize = 10;

/// Key of the translation memory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryKey {
    /// Exact source text or phrase
    pub source_text: String,
    /// Target language code, matched exactly
    pub target_language: String,
}

impl MemoryKey {
    pub fn new(source_text: &str, target_language: &str) -> Self {
        Self {
            source_text: source_text.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

/// Memory of one conversation
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    translation_memory: HashMap<MemoryKey, String>,
    conversation_context: Vec<String>,
    terminology_glossary: HashMap<String, String>,
    session_context: String,
}

impl ConversationMemory {
    /// Create an empty memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a translation; the last write for a key wins
    pub fn remember_translation(&mut self, source_text: &str, target_language: &str, translated_text: &str) {
        self.translation_memory
            .insert(MemoryKey::new(source_text, target_language), translated_text.to_string());
    }

    /// Look up a remembered translation by exact text and target language
    pub fn recall_translation(&self, source_text: &str, target_language: &str) -> Option<&str> {
        self.translation_memory
            .get(&MemoryKey::new(source_text, target_language))
            .map(String::as_str)
    }

    /// Number of remembered translations
    pub fn translation_count(&self) -> usize {
        self.translation_memory.len()
    }

    /// Append a context record, evicting the oldest beyond capacity
    pub fn push_context(&mut self, record: String) {
        self.conversation_context.push(record);
        if self.conversation_context.len() > CONTEXT_CAPACITY {
            let overflow = self.conversation_context.len() - CONTEXT_CAPACITY;
            self.conversation_context.drain(..overflow);
        }
    }

    /// All context records, oldest first
    pub fn conversation_context(&self) -> &[String] {
        &self.conversation_context
    }

    /// The `count` most recent context records, oldest first
    pub fn recent_context(&self, count: usize) -> &[String] {
        let start = self.conversation_context.len().saturating_sub(count);
        &self.conversation_context[start..]
    }

    /// Set the preferred translation for a term
    pub fn add_term(&mut self, term: &str, preferred: &str) {
        self.terminology_glossary
            .insert(term.to_string(), preferred.to_string());
    }

    /// Preferred translation for a term
    pub fn preferred_term(&self, term: &str) -> Option<&str> {
        self.terminology_glossary.get(term).map(String::as_str)
    }

    /// Iterate over the glossary entries
    pub fn glossary(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terminology_glossary
            .iter()
            .map(|(term, preferred)| (term.as_str(), preferred.as_str()))
    }

    /// Set the free-text topic of the session
    pub fn set_topic(&mut self, topic: &str) {
        self.session_context = topic.to_string();
    }

    /// Topic of the session
    pub fn topic(&self) -> &str {
        &self.session_context
    }

    /// Commit a completed translation: memory entry plus context record
    pub fn commit(&mut self, source_text: &str, target_language: &str, translated_text: &str) {
        self.remember_translation(source_text, target_language, translated_text);
        self.push_context(format!("Source: {} → Target: {}", source_text, translated_text));
    }
}

/// Session-scoped store of conversation memories
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Arc<Mutex<ConversationMemory>>>>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, session_id: &str) -> Option<Arc<Mutex<ConversationMemory>>> {
        self.sessions.read().get(session_id).cloned()
    }

    fn handle_or_initialize(&self, session_id: &str) -> Arc<Mutex<ConversationMemory>> {
        if let Some(handle) = self.handle(session_id) {
            return handle;
        }

        self.sessions
            .write()
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!("Initializing conversation memory for session {}", session_id);
                Arc::new(Mutex::new(ConversationMemory::new()))
            })
            .clone()
    }

    /// Snapshot of a session's memory, if the session exists
    pub fn get(&self, session_id: &str) -> Option<ConversationMemory> {
        self.handle(session_id).map(|handle| handle.lock().clone())
    }

    /// Snapshot of a session's memory, creating an empty one when missing
    pub fn get_or_initialize(&self, session_id: &str) -> ConversationMemory {
        self.handle_or_initialize(session_id).lock().clone()
    }

    /// Mutate a session's memory under the session lock
    pub fn update<F, R>(&self, session_id: &str, mutate: F) -> R
    where
        F: FnOnce(&mut ConversationMemory) -> R,
    {
        let handle = self.handle_or_initialize(session_id);
        let mut memory = handle.lock();
        mutate(&mut memory)
    }

    /// Drop a session's memory
    pub fn remove(&self, session_id: &str) -> Option<ConversationMemory> {
        self.sessions
            .write()
            .remove(session_id)
            .map(|handle| handle.lock().clone())
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether no session exists
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
