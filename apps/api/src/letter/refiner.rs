//! Refinement Orchestrator: the generate → review → (improve → review) loop.
//!
//! Flow: generate once, review once, then while the best score is below the
//! threshold and tries remain: improve the best draft, review the candidate,
//! adopt it only if it scores strictly higher. Returns the best draft seen.
//!
//! The loop makes at most `2 + 2 * max_outer_tries` step calls.

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::letter::draft::CoverLetterDraft;
use crate::letter::generator::{self, GenerateParams};
use crate::letter::improver::{self, ImproveParams};
use crate::letter::outcome::StepOutcome;
use crate::letter::reviewer::{self, ReviewParams, ReviewResult};
use crate::letter::LetterInputs;
use crate::llm_client::{CompletionBackend, LlmError};

pub const DEFAULT_MODEL: &str = "mistral-small-latest";
pub const DEFAULT_SCORE_THRESHOLD: f64 = 8.0;
pub const DEFAULT_MAX_OUTER_TRIES: u32 = 3;

/// Everything the loop needs besides the texts.
#[derive(Debug, Clone, PartialEq)]
pub struct RefineOptions {
    pub model: String,
    pub score_threshold: f64,
    pub max_outer_tries: u32,
    pub generate: GenerateParams,
    pub review: ReviewParams,
    pub improve: ImproveParams,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            max_outer_tries: DEFAULT_MAX_OUTER_TRIES,
            generate: GenerateParams::default(),
            review: ReviewParams::default(),
            improve: ImproveParams::default(),
        }
    }
}

/// What the loop ended with.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementReport {
    pub draft: CoverLetterDraft,
    pub review: ReviewResult,
    /// Improve attempts made.
    pub iterations: u32,
    /// Whether any candidate replaced the first draft.
    pub improved: bool,
}

/// The three steps the loop drives. `LlmLetterSteps` is the production impl.
#[async_trait]
pub trait LetterSteps: Send + Sync {
    async fn generate(&self, inputs: &LetterInputs<'_>) -> Result<CoverLetterDraft, LlmError>;

    async fn review(&self, draft: &CoverLetterDraft, inputs: &LetterInputs<'_>) -> ReviewResult;

    async fn improve(
        &self,
        draft: &CoverLetterDraft,
        review: &ReviewResult,
        inputs: &LetterInputs<'_>,
    ) -> StepOutcome<CoverLetterDraft>;
}

/// Letter steps backed by LLM completions.
pub struct LlmLetterSteps<'a> {
    backend: &'a dyn CompletionBackend,
    options: &'a RefineOptions,
}

impl<'a> LlmLetterSteps<'a> {
    pub fn new(backend: &'a dyn CompletionBackend, options: &'a RefineOptions) -> Self {
        Self { backend, options }
    }
}

#[async_trait]
impl LetterSteps for LlmLetterSteps<'_> {
    async fn generate(&self, inputs: &LetterInputs<'_>) -> Result<CoverLetterDraft, LlmError> {
        generator::generate(
            self.backend,
            &self.options.model,
            inputs,
            self.options.generate,
        )
        .await
    }

    async fn review(&self, draft: &CoverLetterDraft, inputs: &LetterInputs<'_>) -> ReviewResult {
        reviewer::review(
            self.backend,
            &self.options.model,
            draft,
            inputs,
            self.options.review,
        )
        .await
    }

    async fn improve(
        &self,
        draft: &CoverLetterDraft,
        review: &ReviewResult,
        inputs: &LetterInputs<'_>,
    ) -> StepOutcome<CoverLetterDraft> {
        improver::improve(
            self.backend,
            &self.options.model,
            draft,
            review,
            inputs,
            self.options.improve,
        )
        .await
    }
}

/// Working state of one refinement. Never leaves this module.
struct RefinementState {
    best_draft: CoverLetterDraft,
    best_review: ReviewResult,
    remaining_tries: u32,
}

/// Runs the loop with LLM-backed steps. The best draft is `report.draft`; the
/// report also keeps its review and the loop statistics.
pub async fn refine(
    backend: &dyn CompletionBackend,
    inputs: &LetterInputs<'_>,
    options: &RefineOptions,
) -> Result<RefinementReport, LlmError> {
    let steps = LlmLetterSteps::new(backend, options);
    run_refinement(
        &steps,
        inputs,
        options.score_threshold,
        options.max_outer_tries,
    )
    .await
}

/// The loop itself, generic over the steps.
///
/// Each iteration reviews the improved candidate (not the draft it came from).
/// If the improver exhausts its budget, the iteration still consumes a try and
/// no review is made.
pub async fn run_refinement<S>(
    steps: &S,
    inputs: &LetterInputs<'_>,
    score_threshold: f64,
    max_outer_tries: u32,
) -> Result<RefinementReport, LlmError>
where
    S: LetterSteps + ?Sized,
{
    let refinement_id = Uuid::new_v4();

    let draft = steps.generate(inputs).await?;
    let review = steps.review(&draft, inputs).await;
    info!(
        "Refinement {refinement_id}: initial score {} (threshold {score_threshold}, {max_outer_tries} tries)",
        review.score()
    );

    let mut state = RefinementState {
        best_draft: draft,
        best_review: review,
        remaining_tries: max_outer_tries,
    };
    let mut iterations = 0;
    let mut improved = false;

    while state.best_review.score() < score_threshold && state.remaining_tries > 0 {
        iterations += 1;

        match steps
            .improve(&state.best_draft, &state.best_review, inputs)
            .await
        {
            StepOutcome::Done(candidate) => {
                let candidate_review = steps.review(&candidate, inputs).await;
                let (best, new) = (state.best_review.score(), candidate_review.score());
                if new > best {
                    info!("Refinement {refinement_id}: iteration {iterations} adopted ({best} -> {new})");
                    state.best_draft = candidate;
                    state.best_review = candidate_review;
                    improved = true;
                } else {
                    info!("Refinement {refinement_id}: iteration {iterations} kept best ({new} <= {best})");
                }
            }
            StepOutcome::Exhausted(record) => {
                warn!(
                    "Refinement {refinement_id}: iteration {iterations} produced no candidate: {}",
                    record.error
                );
            }
        }

        state.remaining_tries -= 1;
    }

    info!(
        "Refinement {refinement_id}: finished after {iterations} iterations with score {}",
        state.best_review.score()
    );

    Ok(RefinementReport {
        draft: state.best_draft,
        review: state.best_review,
        iterations,
        improved,
    })
}
