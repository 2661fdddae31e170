/*!
 * Batch translation processing.
 *
 * Runs many pipeline requests concurrently, bounded by a semaphore, and
 * returns the outcomes in input order. Requests sharing a session share its
 * conversation memory; the session store serializes their commits.
 */

use futures::stream::{self, StreamExt};
use log::{error, info};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tokio::sync::Semaphore;

use crate::app_config::PipelineSettings;
use crate::errors::RequestError;

use super::memory::SessionStore;
use super::pipeline::{PipelineController, PipelineOutcome, TranslationRequest};

/// Default limit on pipeline runs in flight
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 5;

/// Default limit on texts per batch
pub const DEFAULT_MAX_BATCH_SIZE: usize = 50;

/// Outcome of one request within a batch
pub type BatchItem = Result<PipelineOutcome, RequestError>;

/// Batch translator for running many requests through the pipeline
#[derive(Debug, Clone)]
pub struct BatchTranslator {
    /// Pipeline used for every request
    controller: PipelineController,

    /// Conversation memory shared by all runs
    store: SessionStore,

    /// Maximum number of concurrent runs
    max_concurrent_requests: usize,

    /// Maximum number of requests accepted at once
    max_batch_size: usize,
}

impl BatchTranslator {
    /// Create a new batch translator with default limits
    pub fn new(controller: PipelineController, store: SessionStore) -> Self {
        Self {
            controller,
            store,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    /// Create a batch translator with limits from the pipeline settings
    pub fn from_settings(controller: PipelineController, store: SessionStore, settings: &PipelineSettings) -> Self {
        Self::new(controller, store).with_limits(settings.max_concurrent_requests, settings.max_batch_size)
    }

    /// Override concurrency and size limits
    pub fn with_limits(mut self, max_concurrent_requests: usize, max_batch_size: usize) -> Self {
        self.max_concurrent_requests = max_concurrent_requests.max(1);
        self.max_batch_size = max_batch_size;
        self
    }

    /// The session store the batch commits into
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Translate plain texts within one session
    pub async fn translate_texts(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
        session_id: &str,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<Vec<BatchItem>, RequestError> {
        let requests = texts
            .iter()
            .map(|text| {
                TranslationRequest::new(text.as_str(), session_id)
                    .with_source_language(source_language)
                    .with_target_language(target_language)
            })
            .collect();

        self.translate_all(requests, progress_callback).await
    }

    /// Run all requests and return their outcomes in input order.
    ///
    /// The batch as a whole is rejected only when it exceeds the size limit;
    /// an invalid request fails on its own slot.
    pub async fn translate_all(
        &self,
        requests: Vec<TranslationRequest>,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<Vec<BatchItem>, RequestError> {
        if requests.len() > self.max_batch_size {
            return Err(RequestError::BatchTooLarge {
                size: requests.len(),
                limit: self.max_batch_size,
            });
        }

        let total = requests.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_requests));
        let processed = Arc::new(AtomicUsize::new(0));
        let start_time = Instant::now();

        let mut results = stream::iter(requests.into_iter().enumerate())
            .map(|(index, request)| {
                let controller = self.controller.clone();
                let store = self.store.clone();
                let semaphore = semaphore.clone();
                let processed = processed.clone();
                let progress_callback = progress_callback.clone();

                async move {
                    // The semaphore is never closed
                    let _permit = semaphore.acquire().await.ok();

                    let result = controller.run(request, &store).await;
                    if let Err(e) = &result {
                        error!("Batch item {} rejected: {}", index + 1, e);
                    }

                    let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total);

                    (index, result)
                }
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect::<Vec<_>>()
            .await;

        results.sort_by_key(|(index, _)| *index);

        let completed = results
            .iter()
            .filter(|(_, result)| matches!(result, Ok(outcome) if outcome.summary.is_completed()))
            .count();
        info!(
            "Batch finished: {}/{} completed in {:?}",
            completed,
            total,
            start_time.elapsed()
        );

        Ok(results.into_iter().map(|(_, result)| result).collect())
    }
}
