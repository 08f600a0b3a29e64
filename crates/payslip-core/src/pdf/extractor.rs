//! PDF text extraction using lopdf and pdf-extract.

use std::borrow::Cow;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::{panic_message, Result, TextExtractor};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// PDF text extractor.
///
/// The document is parsed with lopdf first so that encrypted and empty files
/// are reported as such; text is then pulled out with pdf-extract.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    decrypt_empty_password: bool,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            decrypt_empty_password: true,
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new().with_empty_password_decryption(config.decrypt_empty_password)
    }

    /// Set whether encrypted PDFs are opened with an empty password.
    pub fn with_empty_password_decryption(mut self, enabled: bool) -> Self {
        self.decrypt_empty_password = enabled;
        self
    }

    /// Extract text from PDF bytes.
    pub fn extract_text_from_mem(&self, data: &[u8]) -> Result<String> {
        let data = self.prepare(data)?;

        // pdf-extract panics on some documents lopdf accepts (e.g. unknown fonts)
        let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(&data)
        }));
        let text = extracted
            .map_err(|payload| PdfError::TextExtraction(panic_message(payload.as_ref())))?
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        debug!("Extracted {} chars of text", text.len());
        Ok(text)
    }

    /// Validate the document and return bytes pdf-extract can read.
    fn prepare<'a>(&self, data: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let data = if doc.is_encrypted() {
            if !self.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads from bytes, so hand it the decrypted document
            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            Cow::Owned(decrypted)
        } else {
            Cow::Borrowed(data)
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(data)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let data = fs::read(path)?;
        self.extract_text_from_mem(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::{text_pdf, unknown_font_pdf};

    #[test]
    fn test_extract_text_from_generated_pdf() {
        let data = text_pdf(&["Ordinary Hours 48.0000"]);
        let text = PdfExtractor::new().extract_text_from_mem(&data).unwrap();
        assert!(text.contains("Ordinary Hours 48.0000"));
    }

    #[test]
    fn test_text_backend_panic_becomes_error() {
        let result = PdfExtractor::new().extract_text_from_mem(&unknown_font_pdf());
        match result {
            Err(PdfError::TextExtraction(message)) => assert!(message.contains("panicked")),
            other => panic!("expected a text extraction error, got {:?}", other),
        }
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.decrypt_empty_password);

        let extractor = PdfExtractor::from_config(&PdfConfig {
            decrypt_empty_password: false,
        });
        assert!(!extractor.decrypt_empty_password);
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let result = PdfExtractor::new().extract_text_from_mem(b"definitely not a pdf");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = PdfExtractor::new().extract_text(&dir.path().join("missing.pdf"));
        assert!(matches!(result, Err(PdfError::Io(_))));
    }
}
