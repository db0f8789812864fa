//! Structured Extractor: turns a job posting or a CV into a typed record.
//!
//! Not used by the refinement loop; exposed on its own endpoints.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::letter::outcome::StepOutcome;
use crate::letter::prompts::{extraction_prompt, JOB_INFO_SCHEMA, PERSON_INFO_SCHEMA};
use crate::letter::retry::retry_with_budget;
use crate::llm_client::{complete_json, CompletionBackend, CompletionRequest, ResponseMode};

const JOB_SENTINEL: &str = "An error occurred while processing the job description";
const PERSON_SENTINEL: &str = "An error occurred while processing the CV";
const EXTRACTION_MAX_TOKENS: u32 = 500;
const EXTRACTION_TEMPERATURE: f32 = 0.0;

/// Essential fields of a job posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub requirements: Vec<String>,
}

/// Contact details of the candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonInfo {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Extracts `JobInfo` from a raw job posting.
pub async fn extract_job_info(
    backend: &dyn CompletionBackend,
    model: &str,
    text: &str,
    tries: u32,
) -> StepOutcome<JobInfo> {
    let prompt = extraction_prompt("job description", "Job Description", text, JOB_INFO_SCHEMA);
    let outcome: StepOutcome<JobInfo> =
        extract(backend, model, &prompt, tries, "Job extraction", JOB_SENTINEL).await;
    if let StepOutcome::Done(job) = &outcome {
        info!(
            "Job extracted: title={:?}, {} requirements",
            job.title,
            job.requirements.len()
        );
    }
    outcome
}

/// Extracts `PersonInfo` from CV text.
pub async fn extract_person_info(
    backend: &dyn CompletionBackend,
    model: &str,
    text: &str,
    tries: u32,
) -> StepOutcome<PersonInfo> {
    let prompt = extraction_prompt("CV", "CV", text, PERSON_INFO_SCHEMA);
    extract(backend, model, &prompt, tries, "Person extraction", PERSON_SENTINEL).await
}

async fn extract<T>(
    backend: &dyn CompletionBackend,
    model: &str,
    prompt: &str,
    tries: u32,
    step: &str,
    sentinel: &str,
) -> StepOutcome<T>
where
    T: serde::de::DeserializeOwned,
{
    let request = CompletionRequest {
        model,
        prompt,
        mode: ResponseMode::JsonObject,
        max_tokens: EXTRACTION_MAX_TOKENS,
        temperature: EXTRACTION_TEMPERATURE,
    };
    retry_with_budget(step, tries, sentinel, || complete_json::<T>(backend, request)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letter::retry::DEFAULT_TRIES;
    use crate::llm_client::testing::{api_error, ScriptedBackend};
    use serde_json::json;

    const JOB_JSON: &str = r#"{
        "title": "Senior Backend Engineer",
        "company": "Acme Corp",
        "location": "Remote",
        "requirements": ["Rust", "PostgreSQL"]
    }"#;

    #[tokio::test]
    async fn test_extracts_job_info() {
        let backend = ScriptedBackend::new(vec![Ok(JOB_JSON.to_string())]);
        let outcome = extract_job_info(&backend, "m", "Senior Backend Engineer, Acme Corp", 2).await;

        let job = outcome.done().unwrap();
        assert_eq!(job.title.as_deref(), Some("Senior Backend Engineer"));
        assert_eq!(job.company.as_deref(), Some("Acme Corp"));
        assert_eq!(job.requirements, vec!["Rust", "PostgreSQL"]);
        assert!(job.description.is_none());

        let requests = backend.requests();
        assert_eq!(requests[0].mode, ResponseMode::JsonObject);
        assert!(requests[0].prompt.contains("Senior Backend Engineer, Acme Corp"));
    }

    #[tokio::test]
    async fn test_extraction_is_idempotent_for_deterministic_backend() {
        let backend = ScriptedBackend::new(vec![Ok(JOB_JSON.to_string()), Ok(JOB_JSON.to_string())]);
        let first = extract_job_info(&backend, "m", "posting", 2).await;
        let second = extract_job_info(&backend, "m", "posting", 2).await;
        assert_eq!(first, second);
        assert_eq!(backend.requests()[0].prompt, backend.requests()[1].prompt);
    }

    #[tokio::test]
    async fn test_malformed_output_is_retried() {
        let backend = ScriptedBackend::new(vec![
            Ok("not json at all".to_string()),
            Ok(r#"{"full_name": "Jane Doe", "email": "jane@example.com"}"#.to_string()),
        ]);
        let outcome = extract_person_info(&backend, "m", "Jane Doe, jane@example.com", 2).await;

        let person = outcome.done().unwrap();
        assert_eq!(person.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(person.email.as_deref(), Some("jane@example.com"));
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_budget_returns_sentinel() {
        let backend = ScriptedBackend::new(vec![Err(api_error(503)), Err(api_error(503))]);
        let outcome = extract_job_info(&backend, "m", "posting", DEFAULT_TRIES).await;

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"error": "An error occurred while processing the job description"})
        );
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_person_sentinel_message() {
        let backend = ScriptedBackend::new(vec![]);
        let outcome = extract_person_info(&backend, "m", "cv", 1).await;
        assert_eq!(outcome, StepOutcome::exhausted(PERSON_SENTINEL));
    }
}
