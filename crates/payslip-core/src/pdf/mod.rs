//! PDF text extraction module.

mod extractor;
#[cfg(test)]
pub(crate) mod testing;

pub use extractor::PdfExtractor;

use std::any::Any;
use std::path::Path;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Turns a document on disk into plain text.
///
/// The batch aggregator treats the returned text as opaque. Errors are
/// recovered per document, so implementations should fail rather than
/// return partial garbage.
pub trait TextExtractor {
    /// Extract the full text of the document at `path`.
    fn extract_text(&self, path: &Path) -> Result<String>;
}

/// Best-effort message from a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("text backend panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("text backend panicked: {}", message)
    } else {
        "text backend panicked".to_string()
    }
}
