//! Batch processing over a folder of payslips.
//!
//! Documents are processed one at a time in discovery order. A document whose
//! text cannot be extracted still yields a row (with every field empty), and
//! never aborts the batch.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use tracing::{debug, info, warn};

use crate::error::BatchError;
use crate::extraction::PayslipParser;
use crate::models::config::{BatchConfig, PayslipConfig};
use crate::models::record::ExtractionRecord;
use crate::pdf::{panic_message, PdfExtractor, TextExtractor};

/// A document whose text could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    /// File name of the document.
    pub filename: String,
    /// Error message from the text extractor.
    pub error: String,
}

/// Records for one batch, in discovery order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Folder the documents were read from.
    pub source: PathBuf,
    /// One record per discovered document.
    pub records: Vec<ExtractionRecord>,
    /// Documents that produced no text because extraction failed.
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    /// Number of rows in the report.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records with at least one extracted field.
    pub fn extracted_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_empty()).count()
    }
}

/// Why a batch produced nothing to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoDataReason {
    /// No file in the folder matched the document extensions.
    NoDocuments,
    /// Documents were found but none yielded a single field.
    NothingExtracted {
        documents: usize,
        failed: usize,
    },
}

/// Outcome of a batch that passed its precondition checks.
#[derive(Debug, Clone)]
pub enum BatchOutcome {
    /// At least one field was extracted.
    Report(BatchReport),
    /// Nothing to report; no output should be written.
    NoData(NoDataReason),
}

impl BatchOutcome {
    /// The report, if any.
    pub fn report(&self) -> Option<&BatchReport> {
        match self {
            BatchOutcome::Report(report) => Some(report),
            BatchOutcome::NoData(_) => None,
        }
    }
}

/// Drives text extraction and field extraction over a folder.
pub struct BatchRunner<E> {
    extractor: E,
    parser: PayslipParser,
    extensions: Vec<String>,
}

impl<E: TextExtractor> BatchRunner<E> {
    /// Create a runner that picks up `.pdf` files.
    pub fn new(extractor: E, parser: PayslipParser) -> Self {
        Self {
            extractor,
            parser,
            extensions: vec!["pdf".to_string()],
        }
    }

    /// Apply batch configuration.
    pub fn with_config(self, config: &BatchConfig) -> Self {
        self.with_extensions(config.extensions.iter().cloned())
    }

    /// Set the document extensions (case-insensitive, leading dot optional).
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.into().trim_start_matches('.').to_string())
            .collect();
        self
    }

    /// Check the source folder and list its documents.
    ///
    /// Only direct children are considered. Paths come back in glob order.
    pub fn discover(&self, source: &Path) -> Result<Vec<PathBuf>, BatchError> {
        if !source.exists() {
            return Err(BatchError::SourceNotFound(source.to_path_buf()));
        }
        if !source.is_dir() {
            return Err(BatchError::NotADirectory(source.to_path_buf()));
        }

        let enumerate_error = |reason: String| BatchError::Enumerate {
            path: source.to_path_buf(),
            reason,
        };

        let dir = source
            .to_str()
            .ok_or_else(|| enumerate_error("path is not valid UTF-8".to_string()))?;
        let pattern = format!("{}/*", Pattern::escape(dir));
        let entries = glob(&pattern).map_err(|e| enumerate_error(e.to_string()))?;

        let mut documents = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => {
                    if path.is_file() && self.matches_extension(&path) {
                        documents.push(path);
                    }
                }
                Err(e) => warn!("Skipping unreadable entry: {}", e),
            }
        }

        debug!("Found {} documents in {}", documents.len(), source.display());
        Ok(documents)
    }

    /// Run the batch over every document in `source`.
    pub fn run(&self, source: &Path) -> Result<BatchOutcome, BatchError> {
        let documents = self.discover(source)?;
        Ok(self.process(source, &documents, |_| {}))
    }

    /// Process already discovered documents, calling `on_record` after each.
    pub fn process<F>(
        &self,
        source: &Path,
        documents: &[PathBuf],
        mut on_record: F,
    ) -> BatchOutcome
    where
        F: FnMut(&ExtractionRecord),
    {
        if documents.is_empty() {
            info!("No documents found in {}", source.display());
            return BatchOutcome::NoData(NoDataReason::NoDocuments);
        }

        let mut records = Vec::with_capacity(documents.len());
        let mut failures = Vec::new();

        for path in documents {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            debug!("Processing {}", filename);

            // Text is dropped at the end of each iteration
            let text = match self.extract_isolated(path) {
                Ok(text) => text,
                Err(error) => {
                    warn!("Failed to extract text from {}: {}", path.display(), error);
                    failures.push(DocumentFailure {
                        filename: filename.clone(),
                        error,
                    });
                    String::new()
                }
            };

            let record = ExtractionRecord::new(filename, self.parser.extract_fields(&text));
            on_record(&record);
            records.push(record);
        }

        let report = BatchReport {
            source: source.to_path_buf(),
            records,
            failures,
        };

        info!(
            "Processed {} documents: {} with data, {} failed",
            report.len(),
            report.extracted_count(),
            report.failures.len()
        );

        if report.extracted_count() == 0 {
            return BatchOutcome::NoData(NoDataReason::NothingExtracted {
                documents: report.len(),
                failed: report.failures.len(),
            });
        }

        BatchOutcome::Report(report)
    }

    /// Extract one document's text, also turning a panicking extractor into an error.
    fn extract_isolated(&self, path: &Path) -> Result<String, String> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.extractor.extract_text(path))) {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(payload) => Err(panic_message(payload.as_ref())),
        }
    }

    /// Extract a single document, propagating any failure.
    pub fn process_file(&self, path: &Path) -> crate::Result<ExtractionRecord> {
        let text = self.extractor.extract_text(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(ExtractionRecord::new(filename, self.parser.extract_fields(&text)))
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

impl BatchRunner<PdfExtractor> {
    /// Create a PDF batch runner from configuration.
    ///
    /// Fails if a configured extraction rule does not compile.
    pub fn from_config(config: &PayslipConfig) -> crate::Result<Self> {
        let parser = PayslipParser::from_config(&config.extraction)?;
        Ok(Self::new(PdfExtractor::from_config(&config.pdf), parser).with_config(&config.batch))
    }
}

/// Run a batch over `source` with the default PDF extractor and rules.
pub fn run_batch(source: &Path) -> Result<BatchOutcome, BatchError> {
    BatchRunner::new(PdfExtractor::new(), PayslipParser::new()).run(source)
}
