/*!
 * Pipeline controller.
 *
 * Drives one request through the stages
 * `Routing → Contextualizing → Translating → Assessing → Finalizing → Done`.
 * A `retry` verdict loops back to `Translating` until `max_attempts`
 * translation attempts have been made; after that the run is escalated to
 * human review. Every run terminates with a summary.
 */

use log::{debug, warn};
use serde::Serialize;
use std::fmt;

use crate::app_config::Config;
use crate::errors::{ProviderError, RequestError};
use crate::providers::ProviderRegistry;
use crate::translation::assessor;
use crate::translation::coordinator::TranslatorCoordinator;
use crate::translation::memory::SessionStore;
use crate::translation::resolver;
use crate::translation::router;

use super::finalizer::{self, TranslationSummary};
use super::state::{NextAction, PipelineState, TranslationRequest};

/// Default number of translation attempts per request
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Stage of a pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Routing,
    Contextualizing,
    Translating,
    Assessing,
    Finalizing,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Routing => "ROUTING",
            Self::Contextualizing => "CONTEXTUALIZING",
            Self::Translating => "TRANSLATING",
            Self::Assessing => "ASSESSING",
            Self::Finalizing => "FINALIZING",
            Self::Done => "DONE",
        })
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub summary: TranslationSummary,
    /// Final pipeline state, for inspection
    pub state: PipelineState,
    /// Human-readable stage messages, in order
    pub trace: Vec<String>,
}

/// Sequences the pipeline stages for single requests
#[derive(Debug, Clone)]
pub struct PipelineController {
    coordinator: TranslatorCoordinator,
    max_attempts: u32,
}

impl PipelineController {
    /// Create a controller allowing `DEFAULT_MAX_ATTEMPTS` attempts
    pub fn new(coordinator: TranslatorCoordinator) -> Self {
        Self {
            coordinator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Set the attempt bound; at least one attempt is always made
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Build the provider and controller described by `config`
    pub fn from_config(config: &Config, registry: &ProviderRegistry) -> Result<Self, ProviderError> {
        let provider = registry.build(&config.provider)?;
        let coordinator = TranslatorCoordinator::new(provider).with_timeout(config.pipeline.provider_timeout());

        Ok(Self::new(coordinator).with_max_attempts(config.pipeline.max_attempts))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn coordinator(&self) -> &TranslatorCoordinator {
        &self.coordinator
    }

    /// Run one request to completion.
    ///
    /// Only an invalid request is an error; provider failures end up in the
    /// outcome's issues and error messages.
    pub async fn run(&self, request: TranslationRequest, store: &SessionStore) -> Result<PipelineOutcome, RequestError> {
        request.validate()?;

        let mut state = PipelineState::new(request);
        let mut trace = Vec::new();
        let mut attempts = 0u32;
        let mut stage = PipelineStage::Routing;

        while stage != PipelineStage::Finalizing {
            let next = match stage {
                PipelineStage::Routing => {
                    let route = router::route(state.source_text());
                    state.complexity = Some(route.complexity);
                    state.approach = Some(route.approach);
                    record(
                        &mut trace,
                        format!(
                            "Router: Selected {} approach for {} text",
                            route.approach, route.complexity
                        ),
                    );
                    PipelineStage::Contextualizing
                }
                PipelineStage::Contextualizing => {
                    let memory = store.get_or_initialize(&state.request.session_id);
                    let resolved = resolver::resolve(&memory, state.source_text(), state.target_language());
                    state.context_strategy = Some(resolved.strategy);
                    state.relevant_context = resolved.relevant_context;
                    state.repeated_phrases = resolved.repeated_phrases;
                    state.glossary_terms = resolved.glossary_terms;
                    record(&mut trace, format!("Context: Using {} strategy", resolved.strategy));
                    PipelineStage::Translating
                }
                PipelineStage::Translating => {
                    attempts += 1;
                    let message = self.coordinator.translate(&mut state).await;
                    record(&mut trace, message);
                    PipelineStage::Assessing
                }
                PipelineStage::Assessing => {
                    let message = assessor::assess_state(&mut state);
                    record(&mut trace, message);
                    self.after_assessment(&mut state, &mut trace, attempts)
                }
                // The loop exits on Finalizing
                PipelineStage::Finalizing | PipelineStage::Done => PipelineStage::Finalizing,
            };
            debug!("Pipeline stage {} -> {}", stage, next);
            stage = next;
        }

        let (summary, message) = finalizer::finalize(&state, store);
        record(&mut trace, message);
        debug!("Pipeline stage {} -> {}", stage, PipelineStage::Done);

        Ok(PipelineOutcome { summary, state, trace })
    }

    fn after_assessment(&self, state: &mut PipelineState, trace: &mut Vec<String>, attempts: u32) -> PipelineStage {
        if state.next_action != Some(NextAction::Retry) {
            return PipelineStage::Finalizing;
        }

        if attempts < self.max_attempts {
            state.retry_count += 1;
            return PipelineStage::Translating;
        }

        warn!(
            "Retry limit reached after {} attempts for session {}",
            attempts, state.request.session_id
        );
        state.next_action = Some(NextAction::HumanReview);
        state
            .quality_issues
            .push(format!("Retry limit reached after {} attempts", attempts));
        record(
            trace,
            format!("Controller: Retry limit reached after {} attempts, escalating", attempts),
        );
        PipelineStage::Finalizing
    }
}

fn record(trace: &mut Vec<String>, message: String) {
    debug!("{}", message);
    trace.push(message);
}
