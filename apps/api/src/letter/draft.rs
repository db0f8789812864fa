//! Cover letter drafts and their salutation/closing contract.

use serde::{Deserialize, Serialize};

const SALUTATION: &str = "Dear ";
const CLOSING: &str = "Sincerely,";

/// One candidate cover letter, plain text with paragraphs separated by blank lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverLetterDraft(String);

/// Whether a draft honours the output contract the prompts request.
/// Reported, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContractReport {
    pub has_salutation: bool,
    pub has_closing: bool,
}

impl ContractReport {
    pub fn is_satisfied(&self) -> bool {
        self.has_salutation && self.has_closing
    }
}

impl CoverLetterDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks that the draft starts with "Dear " and that its last paragraph
    /// carries the "Sincerely," closing followed by a name.
    pub fn contract(&self) -> ContractReport {
        let text = self.0.trim();
        let has_salutation = text.starts_with(SALUTATION);
        let has_closing = text
            .rfind(CLOSING)
            .map(|idx| {
                let signature = text[idx + CLOSING.len()..].trim();
                !signature.is_empty() && !signature.contains("\n\n")
            })
            .unwrap_or(false);

        ContractReport {
            has_salutation,
            has_closing,
        }
    }
}

impl std::fmt::Display for CoverLetterDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_draft_satisfies_contract() {
        let draft = CoverLetterDraft::new(
            "Dear Hiring Manager,\n\nI am applying for the role.\n\nSincerely,\nJane Doe",
        );
        assert!(draft.contract().is_satisfied());
    }

    #[test]
    fn test_single_line_closing_is_accepted() {
        let draft = CoverLetterDraft::new("Dear Hiring Manager, ... Sincerely, Jane Doe");
        assert!(draft.contract().is_satisfied());
    }

    #[test]
    fn test_missing_salutation_is_reported() {
        let draft = CoverLetterDraft::new("Here is your letter:\n\nDear team,\n\nSincerely,\nJane");
        let report = draft.contract();
        assert!(!report.has_salutation);
        assert!(report.has_closing);
    }

    #[test]
    fn test_closing_without_name_is_reported() {
        let draft = CoverLetterDraft::new("Dear team,\n\nThanks.\n\nSincerely,");
        assert!(!draft.contract().has_closing);
    }

    #[test]
    fn test_text_after_signature_paragraph_breaks_closing() {
        let draft =
            CoverLetterDraft::new("Dear team,\n\nSincerely,\nJane\n\nP.S. I can start tomorrow.");
        assert!(!draft.contract().has_closing);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let draft = CoverLetterDraft::new("Dear team");
        assert_eq!(serde_json::to_string(&draft).unwrap(), "\"Dear team\"");
    }
}
