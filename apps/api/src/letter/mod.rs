// Cover letter engine
// Implements: structured extraction, generation, review, revision, and the
// self-refinement loop that ties them together.
// All LLM calls go through llm_client, never directly to the provider.

pub mod draft;
pub mod extractor;
pub mod generator;
pub mod handlers;
pub mod improver;
pub mod outcome;
pub mod prompts;
pub mod refiner;
pub mod retry;
pub mod reviewer;

/// The three texts every letter prompt is built from.
/// `guidance` is empty when the user gave no extra instructions.
#[derive(Debug, Clone, Copy)]
pub struct LetterInputs<'a> {
    pub resume: &'a str,
    pub job_description: &'a str,
    pub guidance: &'a str,
}
