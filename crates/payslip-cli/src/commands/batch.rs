//! Batch processing command for a folder of payslips.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use payslip_core::{
    BatchOutcome, BatchReport, BatchRunner, CsvReportWriter, JsonReportWriter, NoDataReason,
    ReportWriter,
};

use super::config::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Folder containing payslip files
    #[arg(required = true)]
    input: PathBuf,

    /// Report file (default: output.csv inside the input folder)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ReportFormat,

    /// Document extension to include, repeatable (default: pdf)
    #[arg(short, long = "extension")]
    extensions: Vec<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReportFormat {
    /// Comma-separated values
    Csv,
    /// JSON array of records
    Json,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if !args.extensions.is_empty() {
        config.batch.extensions = args.extensions.clone();
    }

    let runner = BatchRunner::from_config(&config)?;
    let documents = runner.discover(&args.input)?;

    println!(
        "{} Found {} payslips to process",
        style("ℹ").blue(),
        documents.len()
    );

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}",
            )?
            .progress_chars("=>-"),
    );

    // Text extraction is blocking work, keep it off the async workers
    let source = args.input.clone();
    let progress = pb.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        runner.process(&source, &documents, |record| {
            progress.set_message(record.filename.clone());
            progress.inc(1);
        })
    })
    .await?;

    pb.finish_and_clear();

    let report = match outcome {
        BatchOutcome::Report(report) => report,
        BatchOutcome::NoData(reason) => {
            report_no_data(&args.input, &reason);
            return Ok(());
        }
    };

    let output_path = args.output.clone().unwrap_or_else(|| {
        default_output_path(&args.input, &config.batch.output_file, args.format)
    });

    let writer: Box<dyn ReportWriter> = match args.format {
        ReportFormat::Csv => Box::new(CsvReportWriter),
        ReportFormat::Json => Box::new(JsonReportWriter),
    };
    writer.write_to_path(&report.records, &output_path)?;

    println!(
        "{} Data saved to {}",
        style("✓").green(),
        output_path.display()
    );

    print_summary(&report);
    debug!("Batch finished in {:?}", start.elapsed());

    Ok(())
}

fn default_output_path(input: &Path, output_file: &str, format: ReportFormat) -> PathBuf {
    let path = input.join(output_file);
    match format {
        ReportFormat::Csv => path,
        ReportFormat::Json => path.with_extension("json"),
    }
}

fn report_no_data(input: &Path, reason: &NoDataReason) {
    match reason {
        NoDataReason::NoDocuments => println!(
            "{} No payslip files found in {}",
            style("ℹ").blue(),
            input.display()
        ),
        NoDataReason::NothingExtracted { documents, failed } => {
            println!(
                "{} No payslip information was extracted from {} files",
                style("ℹ").blue(),
                documents
            );
            if *failed > 0 {
                println!("   {} could not be read", style(failed).red());
            }
        }
    }
    println!("   No report written.");
}

fn print_summary(report: &BatchReport) {
    println!();
    println!(
        "{} Processed {} files",
        style("✓").green(),
        report.len()
    );
    println!(
        "   {} with data, {} without data, {} unreadable",
        style(report.extracted_count()).green(),
        style(report.len() - report.extracted_count()).yellow(),
        style(report.failures.len()).red()
    );

    if !report.failures.is_empty() {
        println!();
        println!("{}", style("Unreadable files:").red());
        for failure in &report.failures {
            println!("  - {}: {}", failure.filename, failure.error);
        }
    }
}
