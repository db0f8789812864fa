//! Résumé ingestion: plain text out of an uploaded PDF.

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("The uploaded file is empty")]
    Empty,

    #[error("The uploaded file is not a PDF")]
    NotPdf,

    #[error("Could not read text from the PDF: {0}")]
    Extract(String),

    #[error("The PDF contains no extractable text")]
    NoText,

    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Extracts the text of every page, in order.
///
/// Parsing runs on the blocking pool; a parser panic surfaces as `PdfError::Task`.
pub async fn extract_text(data: Bytes) -> Result<String, PdfError> {
    if data.is_empty() {
        return Err(PdfError::Empty);
    }
    if !data.starts_with(PDF_MAGIC) {
        return Err(PdfError::NotPdf);
    }

    let size = data.len();
    let text = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&data).map_err(|e| e.to_string())
    })
    .await?
    .map_err(PdfError::Extract)?;

    if text.trim().is_empty() {
        return Err(PdfError::NoText);
    }

    info!("Extracted {} chars from a {size}-byte PDF", text.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_upload_is_rejected() {
        let err = extract_text(Bytes::new()).await.unwrap_err();
        assert!(matches!(err, PdfError::Empty));
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_rejected() {
        let err = extract_text(Bytes::from_static(b"Jane Doe\nBackend engineer"))
            .await
            .unwrap_err();
        assert!(matches!(err, PdfError::NotPdf));
    }

    #[tokio::test]
    async fn test_truncated_pdf_is_an_error() {
        let result = extract_text(Bytes::from_static(b"%PDF-1.4\n%garbage")).await;
        assert!(result.is_err());
    }
}
