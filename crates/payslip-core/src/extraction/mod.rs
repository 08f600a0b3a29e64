//! Payslip field extraction module.

mod parser;
pub mod rules;

pub use parser::{extract_fields, PayslipParser};
