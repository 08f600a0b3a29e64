//! Error types for the payslip-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the payslip library.
#[derive(Error, Debug)]
pub enum PayslipError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to read the PDF file.
    #[error("failed to read PDF: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to payslip field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A pattern rule could not be compiled.
    #[error("invalid pattern for {field}: {pattern}: {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },
}

/// Errors that abort a batch before any document is processed.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The source location does not exist.
    #[error("source folder not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The source location exists but is not a directory.
    #[error("source is not a folder: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The source directory could not be enumerated.
    #[error("failed to list {}: {reason}", .path.display())]
    Enumerate { path: PathBuf, reason: String },
}

/// Errors raised while writing a batch report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the report failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the payslip library.
pub type Result<T> = std::result::Result<T, PayslipError>;
