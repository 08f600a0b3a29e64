//! Tabular output for batch reports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::ReportError;
use crate::models::record::ExtractionRecord;

/// Column headers, in output order.
pub const COLUMNS: [&str; 4] = [
    "Pay Period Start",
    "Pay Period End",
    "Total Hours Worked",
    "Filename",
];

/// Writes extraction records to a sink.
pub trait ReportWriter {
    /// Write `records` to `out`, in order.
    fn write(&self, records: &[ExtractionRecord], out: &mut dyn Write) -> Result<(), ReportError>;

    /// Write `records` to a file, replacing it if it exists.
    fn write_to_path(&self, records: &[ExtractionRecord], path: &Path) -> Result<(), ReportError> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write(records, &mut out)?;
        out.flush()?;
        debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }
}

/// CSV writer. The header row is always written, absent values are empty cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReportWriter;

impl ReportWriter for CsvReportWriter {
    fn write(&self, records: &[ExtractionRecord], out: &mut dyn Write) -> Result<(), ReportError> {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);

        wtr.write_record(COLUMNS)?;
        for record in records {
            wtr.serialize(record)?;
        }

        wtr.flush()?;
        Ok(())
    }
}

/// JSON writer producing an array of records.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportWriter;

impl ReportWriter for JsonReportWriter {
    fn write(&self, records: &[ExtractionRecord], out: &mut dyn Write) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut *out, records)?;
        writeln!(out)?;
        Ok(())
    }
}
