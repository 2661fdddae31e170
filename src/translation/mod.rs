/*!
 * Translation pipeline stages and their shared memory.
 *
 * - `router`: complexity classification and approach selection
 * - `memory`: per-session conversation memory and the session store
 * - `resolver`: context lookups against a memory snapshot
 * - `coordinator`: the provider call and terminology post-processing
 * - `assessor`: quality scoring and the next-action decision
 * - `pipeline`: request state, the controller and the finalizer
 * - `batch`: concurrent runs over many requests
 */

// Re-export main types for easier usage
pub use self::batch::BatchTranslator;
pub use self::coordinator::TranslatorCoordinator;
pub use self::memory::{ConversationMemory, SessionStore};
pub use self::pipeline::{
    FinalStatus, NextAction, PipelineController, PipelineOutcome, PipelineState, TranslationRequest,
    TranslationSummary,
};
pub use self::router::{Approach, Complexity, Route};

// Submodules
pub mod assessor;
pub mod batch;
pub mod coordinator;
pub mod memory;
pub mod pipeline;
pub mod resolver;
pub mod router;
