//! Data models for payslip processing.

pub mod config;
pub mod record;
