/*!
 * Concurrent batch runs sharing sessions
 */

use std::sync::Arc;

use parlance::app_config::PipelineSettings;
use parlance::errors::RequestError;
use parlance::providers::MockProvider;
use parlance::translation::memory::SessionStore;
use parlance::translation::{BatchTranslator, PipelineController, TranslationRequest, TranslatorCoordinator};

use crate::common::{ConcurrencyTracker, controller_with};

fn texts(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Sentence number {}", i)).collect()
}

#[tokio::test]
async fn test_batch_inOneSession_shouldCommitEveryTranslation() {
    let provider = MockProvider::echo_tagged();
    let batch = BatchTranslator::new(controller_with(&provider), SessionStore::new());

    let results = batch
        .translate_texts(&texts(20), "en", "es", "shared", |_, _| {})
        .await
        .unwrap();

    assert_eq!(results.len(), 20);
    assert!(results.iter().all(|r| r.as_ref().is_ok_and(|o| o.summary.is_completed())));
    assert_eq!(provider.call_count(), 20);

    let memory = batch.store().get("shared").unwrap();
    assert_eq!(memory.translation_count(), 20);
    assert_eq!(memory.conversation_context().len(), 10);
}

#[tokio::test]
async fn test_batch_shouldNeverExceedConcurrencyLimit() {
    let tracker = Arc::new(ConcurrencyTracker::default());
    let controller = PipelineController::new(TranslatorCoordinator::new(tracker.clone()));
    let batch = BatchTranslator::new(controller, SessionStore::new()).with_limits(3, 50);

    let results = batch
        .translate_texts(&texts(12), "auto", "de", "s1", |_, _| {})
        .await
        .unwrap();

    assert_eq!(results.len(), 12);
    assert!(tracker.max_in_flight() <= 3);
    assert!(tracker.max_in_flight() >= 1);
}

#[tokio::test]
async fn test_batch_overDefaultLimit_shouldRejectWithoutRunning() {
    let provider = MockProvider::echo_tagged();
    let batch = BatchTranslator::from_settings(
        controller_with(&provider),
        SessionStore::new(),
        &PipelineSettings::default(),
    );

    let result = batch
        .translate_texts(&texts(51), "en", "es", "s1", |_, _| {})
        .await;

    assert_eq!(result.unwrap_err(), RequestError::BatchTooLarge { size: 51, limit: 50 });
    assert_eq!(provider.call_count(), 0);
    assert!(batch.store().is_empty());
}

#[tokio::test]
async fn test_batch_acrossSessions_shouldKeepMemoriesApart() {
    let provider = MockProvider::echo_tagged();
    let batch = BatchTranslator::new(controller_with(&provider), SessionStore::new());
    let requests = vec![
        TranslationRequest::new("Good evening to you", "alice"),
        TranslationRequest::new("Good night to you", "bob"),
        TranslationRequest::new("See you tomorrow", "alice"),
    ];

    let results = batch.translate_all(requests, |_, _| {}).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(batch.store().get("alice").unwrap().translation_count(), 2);
    assert_eq!(batch.store().get("bob").unwrap().translation_count(), 1);
}
