// Shared prompt fragments and prompt-building utilities.
// Each letter step defines its own template in letter/prompts.rs.
// This file contains cross-cutting fragments.

/// Honesty rules shared by the generation and revision prompts.
pub const AUTHENTICITY_INSTRUCTION: &str = "\
It must read as humanly written: no orthographic or grammatical errors, no repetitions, \
no incoherent sentences and no sentence copied verbatim from the CV.
Show that the candidate aligns with the job description, has the skills and experience \
to succeed in the role and shares the company's values.
Do not invent any skills or experiences that are not in the CV.";

/// Output contract every letter draft must satisfy.
pub const LETTER_CONTRACT_INSTRUCTION: &str = "\
You must only include text content starting with 'Dear ' and ending with 'Sincerely, NAME'.
Keep ALL paragraphs concise and to the point so the cover letter is engaging, easy to read and short.
Your total answer must be between 400 and at most 500 tokens long.";

/// Appended to every JSON-mode prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Return ONLY a JSON object following the provided JSON Schema. \
Do NOT use markdown code fences. Do NOT include explanations.";

/// Renders the optional guidance section.
///
/// Empty guidance yields an empty string so the `### Additional Information:`
/// header never appears without content.
pub fn additional_information_section(guidance: &str) -> String {
    if guidance.is_empty() {
        return String::new();
    }
    format!("\n\n### Additional Information:\n{guidance}")
}
