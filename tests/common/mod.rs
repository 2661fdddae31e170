/*!
 * Common test utilities for the parlance test suite
 */

use anyhow::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

use parlance::errors::ProviderError;
use parlance::providers::{MockProvider, ProviderTranslation, TranslationProvider};
use parlance::translation::{PipelineController, TranslatorCoordinator};

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Controller over a clone of `provider`, sharing its call counter
pub fn controller_with(provider: &MockProvider) -> PipelineController {
    PipelineController::new(TranslatorCoordinator::new(Arc::new(provider.clone())))
}

/// Provider that records how many calls overlap
#[derive(Debug, Default)]
pub struct ConcurrencyTracker {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ConcurrencyTracker {
    /// Highest number of simultaneous calls observed
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationProvider for ConcurrencyTracker {
    fn name(&self) -> &str {
        "tracker"
    }

    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<ProviderTranslation, ProviderError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        Ok(ProviderTranslation::new(format!("<{}> {}", target_language, text), 0.9))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
