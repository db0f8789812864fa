// All LLM prompt templates for the letter module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::letter::LetterInputs;
use crate::llm_client::prompts::{
    additional_information_section, AUTHENTICITY_INSTRUCTION, JSON_ONLY_INSTRUCTION,
    LETTER_CONTRACT_INSTRUCTION,
};

/// JSON schema for job posting extraction.
pub const JOB_INFO_SCHEMA: &str = r#"{"type": "object", "properties": {"title": {"type": "string"}, "description": {"type": "string"}, "location": {"type": "string"}, "company": {"type": "string"}, "requirements": {"type": "array", "items": {"type": "string"}}}}"#;

/// JSON schema for candidate extraction.
pub const PERSON_INFO_SCHEMA: &str = r#"{"type": "object", "properties": {"full_name": {"type": "string"}, "first_name": {"type": "string"}, "last_name": {"type": "string"}, "email": {"type": "string"}, "phone": {"type": "string"}, "address": {"type": "string"}}}"#;

/// JSON schema for letter reviews.
pub const REVIEW_SCHEMA: &str = r#"{"type": "object", "properties": {"feedback": {"type": "string"}, "rating": {"type": "number", "minimum": 1, "maximum": 10}}, "required": ["feedback", "rating"]}"#;

const LETTER_STRUCTURE: &str = "\
### Structure:
- Introduction (1 paragraph)
    - State clearly in your opening sentence the purpose of the letter and give a brief professional introduction.
    - Specify why you are interested in that specific position and organization.
    - Provide an overview of the main strengths and skills you will bring to the role.
    - Show that you share the company's values (if you know them).
- Body (2-3 paragraphs)
    - Cite a couple of examples from your experience that support your ability to succeed in the position or organization.
    - Do not simply repeat the CV in paragraph form; complement it with a little more detail about key experiences.
    - Discuss the skills you have developed and connect them back to the target role.
- Conclusion (1 paragraph)
    - Restate succinctly your interest in the role and why you are a good candidate.
    - Thank the reader for their time and consideration.";

/// Extraction prompt. `source_label` names the section holding `text`.
pub fn extraction_prompt(subject: &str, source_label: &str, text: &str, schema: &str) -> String {
    format!(
        "Analyse the provided {subject} and retrieve the essential information. \
Your answer should strictly follow this JSON schema.

### {source_label}:
{text}

### JSON Schema:
{schema}

### Answer:
Return your answer as a short JSON object following the provided JSON Schema.
{JSON_ONLY_INSTRUCTION}"
    )
}

pub fn generation_prompt(inputs: &LetterInputs<'_>) -> String {
    format!(
        "### Task:
Generate a professional and engaging cover letter based on the following CV and job description.
{AUTHENTICITY_INSTRUCTION}
{LETTER_CONTRACT_INSTRUCTION}

{LETTER_STRUCTURE}

### CV:
{resume}

### Job Description:
{job_description}{additional}",
        resume = inputs.resume,
        job_description = inputs.job_description,
        additional = additional_information_section(inputs.guidance),
    )
}

pub fn review_prompt(draft: &str, inputs: &LetterInputs<'_>) -> String {
    format!(
        "### Task:
You are an HR professional with more than 20 years of experience reviewing a cover letter for a job application.
Give constructive feedback on the content, structure and tone of the cover letter and on whether it fits the job description.
Rate from 1 to 10 how well the cover letter aligns with the job description.
Your feedback must be very short (< 200 words), clear, concise and actionable.

### Output format:
The output should be a JSON object following this JSON Schema:
{REVIEW_SCHEMA}

### Cover Letter:
{draft}

### CV:
{resume}

### Job Description:
{job_description}{additional}

{JSON_ONLY_INSTRUCTION}",
        resume = inputs.resume,
        job_description = inputs.job_description,
        additional = additional_information_section(inputs.guidance),
    )
}

pub fn improvement_prompt(draft: &str, feedback: &str, inputs: &LetterInputs<'_>) -> String {
    format!(
        "### Task:
You are a professional writer with more than 20 years of experience improving a cover letter for a job application.
{AUTHENTICITY_INSTRUCTION}
Revise the cover letter below by replacing only the parts the feedback points at. \
The revised letter must not be longer than the current one.
{LETTER_CONTRACT_INSTRUCTION}

### Cover Letter:
{draft}

### CV:
{resume}

### Job Description:
{job_description}

### Feedback:
{feedback}{additional}",
        resume = inputs.resume,
        job_description = inputs.job_description,
        additional = additional_information_section(inputs.guidance),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME: &str = "Jane Doe, 5 years backend engineering";
    const JOB: &str = "Senior Backend Engineer, Acme Corp";
    const HEADER: &str = "Additional Information";

    fn inputs(guidance: &str) -> LetterInputs<'_> {
        LetterInputs {
            resume: RESUME,
            job_description: JOB,
            guidance,
        }
    }

    fn all_prompts(guidance: &str) -> Vec<String> {
        let inputs = inputs(guidance);
        vec![
            generation_prompt(&inputs),
            review_prompt("Dear team", &inputs),
            improvement_prompt("Dear team", "Be specific", &inputs),
        ]
    }

    #[test]
    fn test_empty_guidance_omits_section_everywhere() {
        for prompt in all_prompts("") {
            assert!(!prompt.contains(HEADER), "unexpected section in: {prompt}");
        }
    }

    #[test]
    fn test_guidance_appears_verbatim_everywhere() {
        let guidance = "Emphasize my Rust work; keep it under 300 words.";
        for prompt in all_prompts(guidance) {
            assert!(prompt.contains(&format!("### {HEADER}:\n{guidance}")));
        }
    }

    #[test]
    fn test_generation_prompt_embeds_inputs_and_contract() {
        let prompt = generation_prompt(&inputs(""));
        assert!(prompt.contains(&format!("### CV:\n{RESUME}")));
        assert!(prompt.contains(&format!("### Job Description:\n{JOB}")));
        assert!(prompt.contains("'Dear '"));
        assert!(prompt.contains("'Sincerely, NAME'"));
        assert!(prompt.contains("Body (2-3 paragraphs)"));
        assert!(prompt.contains("Do not invent any skills"));
    }

    #[test]
    fn test_review_prompt_embeds_schema_and_draft() {
        let prompt = review_prompt("Dear Hiring Manager, hello", &inputs(""));
        assert!(prompt.contains(REVIEW_SCHEMA));
        assert!(prompt.contains("### Cover Letter:\nDear Hiring Manager, hello"));
        assert!(prompt.contains("from 1 to 10"));
    }

    #[test]
    fn test_improvement_prompt_embeds_draft_and_feedback() {
        let prompt = improvement_prompt("Dear team, old text", "Rating: 5/10", &inputs(""));
        assert!(prompt.contains("### Cover Letter:\nDear team, old text"));
        assert!(prompt.contains("### Feedback:\nRating: 5/10"));
        assert!(prompt.contains("must not be longer"));
    }

    #[test]
    fn test_extraction_prompt_embeds_schema() {
        let prompt = extraction_prompt("job description", "Job Description", JOB, JOB_INFO_SCHEMA);
        assert!(prompt.contains(JOB_INFO_SCHEMA));
        assert!(prompt.contains(&format!("### Job Description:\n{JOB}")));
    }

    #[test]
    fn test_schemas_are_valid_json() {
        for schema in [JOB_INFO_SCHEMA, PERSON_INFO_SCHEMA, REVIEW_SCHEMA] {
            let value: serde_json::Value = serde_json::from_str(schema).unwrap();
            assert_eq!(value["type"], "object");
        }
    }
}
