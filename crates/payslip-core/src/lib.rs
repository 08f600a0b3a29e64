//! Core library for payslip processing.
//!
//! This crate provides:
//! - PDF text extraction
//! - Rule-based payslip field extraction (pay period, total hours worked)
//! - Batch processing over a folder with per-document failure isolation
//! - CSV and JSON report output

pub mod batch;
pub mod error;
pub mod extraction;
pub mod models;
pub mod pdf;
pub mod report;

pub use batch::{run_batch, BatchOutcome, BatchReport, BatchRunner, DocumentFailure, NoDataReason};
pub use error::{BatchError, PayslipError, Result};
pub use extraction::{extract_fields, PayslipParser};
pub use models::config::PayslipConfig;
pub use models::record::{ExtractionRecord, PayslipFields};
pub use pdf::{PdfExtractor, TextExtractor};
pub use report::{CsvReportWriter, JsonReportWriter, ReportWriter};
