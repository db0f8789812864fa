//! Letter Generator: one prompt, one draft.
//!
//! A provider failure is returned as `LlmError`; it is never passed on to the
//! reviewer as if it were letter text.

use tracing::{info, warn};

use crate::letter::draft::CoverLetterDraft;
use crate::letter::prompts::generation_prompt;
use crate::letter::LetterInputs;
use crate::llm_client::{CompletionBackend, CompletionRequest, LlmError, ResponseMode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            max_tokens: 500,
            temperature: 0.3,
        }
    }
}

/// Produces a first draft from the résumé, job description and optional guidance.
pub async fn generate(
    backend: &dyn CompletionBackend,
    model: &str,
    inputs: &LetterInputs<'_>,
    params: GenerateParams,
) -> Result<CoverLetterDraft, LlmError> {
    let prompt = generation_prompt(inputs);
    let text = backend
        .complete(CompletionRequest {
            model,
            prompt: &prompt,
            mode: ResponseMode::Text,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        })
        .await?;

    let text = text.trim();
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }

    let draft = CoverLetterDraft::new(text);
    let contract = draft.contract();
    if contract.is_satisfied() {
        info!("Draft generated ({} chars)", draft.as_str().len());
    } else {
        warn!(
            "Generated draft breaks the letter contract: salutation={}, closing={}",
            contract.has_salutation, contract.has_closing
        );
    }

    Ok(draft)
}
