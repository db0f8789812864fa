//! Axum route handlers for the Cover Letter API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::documents::pdf::extract_text;
use crate::errors::AppError;
use crate::letter::draft::{ContractReport, CoverLetterDraft};
use crate::letter::extractor::{extract_job_info, extract_person_info, JobInfo, PersonInfo};
use crate::letter::outcome::StepOutcome;
use crate::letter::refiner::{refine, RefineOptions};
use crate::letter::retry::DEFAULT_TRIES;
use crate::letter::reviewer::ReviewResult;
use crate::letter::LetterInputs;
use crate::state::AppState;

/// Upper bound on per-request outer tries; each try costs up to 2 × the step budget in calls.
const MAX_OUTER_TRIES_LIMIT: u32 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default)]
    pub guidance: String,
    pub score_threshold: Option<f64>,
    pub max_outer_tries: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterResponse {
    pub letter_id: Uuid,
    pub cover_letter: CoverLetterDraft,
    pub review: ReviewResult,
    pub iterations: u32,
    pub improved: bool,
    pub contract: ContractReport,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

/// Per-request overrides of the loop defaults.
#[derive(Debug, Default, Clone, Copy)]
struct Overrides {
    score_threshold: Option<f64>,
    max_outer_tries: Option<u32>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover-letters
///
/// Runs the refinement loop on already-extracted résumé text.
pub async fn handle_create_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let overrides = Overrides {
        score_threshold: request.score_threshold,
        max_outer_tries: request.max_outer_tries,
    };
    let response = create_cover_letter(
        &state,
        &request.resume_text,
        &request.job_description,
        &request.guidance,
        overrides,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/cover-letters/from-pdf
///
/// Multipart form: `resume` (PDF file), `job_description`, optional `guidance`.
pub async fn handle_create_cover_letter_from_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let mut resume_pdf = None;
    let mut job_description = String::new();
    let mut guidance = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read resume: {e}")))?;
                resume_pdf = Some(data);
            }
            "job_description" | "guidance" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read {name}: {e}")))?;
                if name == "guidance" {
                    guidance = value;
                } else {
                    job_description = value;
                }
            }
            _ => {}
        }
    }

    let resume_pdf = resume_pdf
        .ok_or_else(|| AppError::Validation("Please upload a PDF resume first.".to_string()))?;
    validate_job_description(&job_description)?;

    let resume_text = extract_text(resume_pdf).await?;
    let response = create_cover_letter(
        &state,
        &resume_text,
        &job_description,
        &guidance,
        Overrides::default(),
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/extract/job
pub async fn handle_extract_job(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<StepOutcome<JobInfo>>, AppError> {
    require_text(&request.text)?;
    let outcome = extract_job_info(
        state.llm.as_ref(),
        &state.refine_options.model,
        &request.text,
        DEFAULT_TRIES,
    )
    .await;
    Ok(Json(outcome))
}

/// POST /api/v1/extract/person
pub async fn handle_extract_person(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<StepOutcome<PersonInfo>>, AppError> {
    require_text(&request.text)?;
    let outcome = extract_person_info(
        state.llm.as_ref(),
        &state.refine_options.model,
        &request.text,
        DEFAULT_TRIES,
    )
    .await;
    Ok(Json(outcome))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared pipeline
// ────────────────────────────────────────────────────────────────────────────

async fn create_cover_letter(
    state: &AppState,
    resume_text: &str,
    job_description: &str,
    guidance: &str,
    overrides: Overrides,
) -> Result<CoverLetterResponse, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    validate_job_description(job_description)?;
    let options = apply_overrides(&state.refine_options, overrides)?;

    // Whitespace-only guidance is no guidance.
    let guidance = if guidance.trim().is_empty() { "" } else { guidance };
    let inputs = LetterInputs {
        resume: resume_text,
        job_description,
        guidance,
    };

    let letter_id = Uuid::new_v4();
    info!(
        "Creating cover letter {letter_id} (threshold {}, {} tries)",
        options.score_threshold, options.max_outer_tries
    );

    let report = refine(state.llm.as_ref(), &inputs, &options).await?;
    let contract = report.draft.contract();

    Ok(CoverLetterResponse {
        letter_id,
        cover_letter: report.draft,
        review: report.review,
        iterations: report.iterations,
        improved: report.improved,
        contract,
    })
}

fn apply_overrides(defaults: &RefineOptions, overrides: Overrides) -> Result<RefineOptions, AppError> {
    let mut options = defaults.clone();

    if let Some(threshold) = overrides.score_threshold {
        if !(0.0..=10.0).contains(&threshold) {
            return Err(AppError::Validation(
                "score_threshold must be between 0 and 10".to_string(),
            ));
        }
        options.score_threshold = threshold;
    }
    if let Some(tries) = overrides.max_outer_tries {
        if tries > MAX_OUTER_TRIES_LIMIT {
            return Err(AppError::Validation(format!(
                "max_outer_tries must be at most {MAX_OUTER_TRIES_LIMIT}"
            )));
        }
        options.max_outer_tries = tries;
    }

    Ok(options)
}

fn validate_job_description(job_description: &str) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter the job description.".to_string(),
        ));
    }
    Ok(())
}

fn require_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    Ok(())
}
