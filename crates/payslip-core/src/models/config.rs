//! Configuration structures for the payslip pipeline.

use serde::{Deserialize, Serialize};

use crate::extraction::rules::Arity;

/// Main configuration for the payslip pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PayslipConfig {
    /// Batch processing configuration.
    pub batch: BatchConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Batch processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// File extensions treated as payslip documents (matched case-insensitively).
    pub extensions: Vec<String>,

    /// Report file name, written inside the processed folder.
    pub output_file: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["pdf".to_string()],
            output_file: "output.csv".to_string(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Try to open encrypted PDFs with an empty password.
    pub decrypt_empty_password: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            decrypt_empty_password: true,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Pay-period rules tried after the built-in ones.
    pub extra_period_rules: Vec<RuleConfig>,

    /// Total-hours rules tried after the built-in ones.
    pub extra_hours_rules: Vec<RuleConfig>,
}

/// A user-supplied pattern rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Regular expression.
    pub pattern: String,

    /// How the pattern's captures map to field values.
    #[serde(default)]
    pub arity: Arity,
}

impl PayslipConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
