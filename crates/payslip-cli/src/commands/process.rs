//! Process command - extract fields from a single payslip file.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info};

use payslip_core::{
    BatchRunner, CsvReportWriter, ExtractionRecord, PdfExtractor, ReportWriter, TextExtractor,
};

use super::config::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input payslip file
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print the extracted text instead of the fields
    #[arg(long)]
    text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    // Check input file exists
    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.text {
        let text = PdfExtractor::from_config(&config.pdf).extract_text(&args.input)?;
        debug!("Extracted {} chars of text", text.len());
        writeln!(out, "{}", text)?;
        return Ok(());
    }

    let record = BatchRunner::from_config(&config)?.process_file(&args.input)?;

    match args.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?,
        OutputFormat::Csv => CsvReportWriter.write(std::slice::from_ref(&record), &mut out)?,
        OutputFormat::Text => write!(out, "{}", format_record_text(&record))?,
    }

    Ok(())
}

fn format_record_text(record: &ExtractionRecord) -> String {
    let value = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());

    let mut output = String::new();
    output.push_str(&format!("File: {}\n", record.filename));
    output.push_str(&format!("Pay period start:   {}\n", value(&record.pay_period_start)));
    output.push_str(&format!("Pay period end:     {}\n", value(&record.pay_period_end)));
    output.push_str(&format!("Total hours worked: {}\n", value(&record.total_hours_worked)));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use payslip_core::PayslipFields;

    #[test]
    fn test_format_record_text() {
        let record = ExtractionRecord::new(
            "slip.pdf",
            PayslipFields {
                pay_period_start: Some("21/10/2024".to_string()),
                pay_period_end: None,
                total_hours_worked: Some("76.00".to_string()),
            },
        );

        let text = format_record_text(&record);
        assert!(text.contains("File: slip.pdf"));
        assert!(text.contains("Pay period start:   21/10/2024"));
        assert!(text.contains("Pay period end:     -"));
        assert!(text.contains("Total hours worked: 76.00"));
    }
}
