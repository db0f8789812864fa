//! Letter Improver: revises a draft using reviewer feedback.

use tracing::{info, warn};

use crate::letter::draft::CoverLetterDraft;
use crate::letter::outcome::StepOutcome;
use crate::letter::prompts::improvement_prompt;
use crate::letter::retry::{retry_with_budget, DEFAULT_TRIES};
use crate::letter::reviewer::ReviewResult;
use crate::letter::LetterInputs;
use crate::llm_client::{CompletionBackend, CompletionRequest, LlmError, ResponseMode};

const IMPROVE_SENTINEL: &str = "An error occurred while improving the cover letter";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImproveParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub tries: u32,
}

impl Default for ImproveParams {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.3,
            tries: DEFAULT_TRIES,
        }
    }
}

/// Produces a revised candidate. Blank responses count as failed attempts.
pub async fn improve(
    backend: &dyn CompletionBackend,
    model: &str,
    draft: &CoverLetterDraft,
    review: &ReviewResult,
    inputs: &LetterInputs<'_>,
    params: ImproveParams,
) -> StepOutcome<CoverLetterDraft> {
    let prompt = improvement_prompt(draft.as_str(), &review.feedback_text(), inputs);
    let request = CompletionRequest {
        model,
        prompt: &prompt,
        mode: ResponseMode::Text,
        max_tokens: params.max_tokens,
        temperature: params.temperature,
    };

    let outcome = retry_with_budget("Improve", params.tries, IMPROVE_SENTINEL, || async {
        let text = backend.complete(request).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok::<_, LlmError>(CoverLetterDraft::new(text))
    })
    .await;

    if let StepOutcome::Done(candidate) = &outcome {
        let contract = candidate.contract();
        if !contract.is_satisfied() {
            warn!(
                "Improved draft breaks the letter contract: salutation={}, closing={}",
                contract.has_salutation, contract.has_closing
            );
        }
        info!(
            "Draft revised ({} -> {} chars)",
            draft.as_str().len(),
            candidate.as_str().len()
        );
    }
    outcome
}
