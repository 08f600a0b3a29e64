//! Extracted payslip fields and per-document report rows.

use serde::{Deserialize, Serialize};

/// Fields extracted from the text of one payslip.
///
/// Values are the raw matched substrings. Dates and hours are never parsed
/// or normalized at this layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipFields {
    /// First day of the pay period.
    pub pay_period_start: Option<String>,

    /// Last day of the pay period.
    pub pay_period_end: Option<String>,

    /// Total hours worked in the pay period.
    pub total_hours_worked: Option<String>,
}

/// One row of a batch report: the extracted fields tagged with the source
/// document's file name.
///
/// Field order is the column order of the tabular output. Every column is
/// always present; absent values serialize as empty cells (CSV) or `null`
/// (JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    #[serde(rename = "Pay Period Start")]
    pub pay_period_start: Option<String>,

    #[serde(rename = "Pay Period End")]
    pub pay_period_end: Option<String>,

    #[serde(rename = "Total Hours Worked")]
    pub total_hours_worked: Option<String>,

    /// File name of the source document.
    #[serde(rename = "Filename")]
    pub filename: String,
}

impl ExtractionRecord {
    /// Tag extracted fields with the document they came from.
    pub fn new(filename: impl Into<String>, fields: PayslipFields) -> Self {
        Self {
            pay_period_start: fields.pay_period_start,
            pay_period_end: fields.pay_period_end,
            total_hours_worked: fields.total_hours_worked,
            filename: filename.into(),
        }
    }

    /// Returns true when none of the extracted fields has a value.
    pub fn is_empty(&self) -> bool {
        self.pay_period_start.is_none()
            && self.pay_period_end.is_none()
            && self.total_hours_worked.is_none()
    }
}
