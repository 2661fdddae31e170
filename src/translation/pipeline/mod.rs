/*!
 * Translation pipeline for single requests.
 *
 * - `state`: the request and the per-run state threaded through every stage
 * - `controller`: stage sequencing and the bounded retry loop
 * - `finalizer`: memory commit and the user-facing summary
 */

pub mod controller;
pub mod finalizer;
pub mod state;

pub use controller::{PipelineController, PipelineOutcome, PipelineStage};
pub use finalizer::{FinalStatus, TranslationSummary};
pub use state::{NextAction, PipelineState, TranslationRequest};
