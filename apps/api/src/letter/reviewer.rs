//! Letter Reviewer: scores a draft against the job description.

use serde::{de, Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::letter::draft::CoverLetterDraft;
use crate::letter::outcome::StepOutcome;
use crate::letter::prompts::review_prompt;
use crate::letter::retry::{retry_with_budget, DEFAULT_TRIES};
use crate::letter::LetterInputs;
use crate::llm_client::{complete_json, CompletionBackend, CompletionRequest, ResponseMode};

const REVIEW_SENTINEL: &str = "An error occurred while reviewing the cover letter";
const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 10.0;

/// Reviewer verdict. `rating` is on a 1–10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub feedback: String,
    #[serde(deserialize_with = "rating_on_scale")]
    pub rating: f64,
}

/// A rating off the 1–10 scale is malformed output, retried like a missing one.
fn rating_on_scale<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let rating = f64::deserialize(deserializer)?;
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(de::Error::custom(format!(
            "rating {rating} is outside {MIN_RATING}..={MAX_RATING}"
        )))
    }
}

/// A review, or the sentinel left by an exhausted budget.
pub type ReviewResult = StepOutcome<Review>;

impl ReviewResult {
    /// The rating driving the refinement loop. A missing rating scores 0.
    pub fn score(&self) -> f64 {
        match self {
            StepOutcome::Done(review) => review.rating,
            StepOutcome::Exhausted(_) => 0.0,
        }
    }

    /// Feedback as handed to the improver.
    pub fn feedback_text(&self) -> String {
        match self {
            StepOutcome::Done(review) => {
                format!("Rating: {}/10\n{}", review.rating, review.feedback)
            }
            StepOutcome::Exhausted(record) => format!(
                "No reviewer feedback is available ({}). \
                Tighten the letter so it matches the job description more closely.",
                record.error
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub tries: u32,
}

impl Default for ReviewParams {
    fn default() -> Self {
        Self {
            max_tokens: 300,
            temperature: 0.2,
            tries: DEFAULT_TRIES,
        }
    }
}

/// Reviews `draft`, retrying malformed or failed responses up to `params.tries` times.
pub async fn review(
    backend: &dyn CompletionBackend,
    model: &str,
    draft: &CoverLetterDraft,
    inputs: &LetterInputs<'_>,
    params: ReviewParams,
) -> ReviewResult {
    let prompt = review_prompt(draft.as_str(), inputs);
    let request = CompletionRequest {
        model,
        prompt: &prompt,
        mode: ResponseMode::JsonObject,
        max_tokens: params.max_tokens,
        temperature: params.temperature,
    };

    let outcome = retry_with_budget("Review", params.tries, REVIEW_SENTINEL, || {
        complete_json::<Review>(backend, request)
    })
    .await;

    if let StepOutcome::Done(review) = &outcome {
        info!("Draft reviewed: rating={}", review.rating);
    }
    outcome
}
