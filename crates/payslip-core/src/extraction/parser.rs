//! Payslip parser combining the per-field rule groups.

use lazy_static::lazy_static;
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, RuleConfig};
use crate::models::record::PayslipFields;

use super::rules::{FieldExtractor, HoursExtractor, PatternRule, PayPeriodExtractor};

lazy_static! {
    static ref DEFAULT_PARSER: PayslipParser = PayslipParser::new();
}

/// Rule-based payslip parser.
///
/// Every field is extracted independently: a field that cannot be found is
/// left empty and never affects the others. Parsing is a pure function of
/// the input text.
#[derive(Debug, Clone, Default)]
pub struct PayslipParser {
    period: PayPeriodExtractor,
    hours: HoursExtractor,
}

impl PayslipParser {
    /// Create a parser with the built-in rules.
    pub fn new() -> Self {
        Self {
            period: PayPeriodExtractor::new(),
            hours: HoursExtractor::new(),
        }
    }

    /// Create a parser with the built-in rules followed by the configured ones.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        let mut parser = Self::new();

        for rule in &config.extra_period_rules {
            let rule = compile(parser.period.group().field(), rule)?;
            parser.period = parser.period.with_rule(rule);
        }
        for rule in &config.extra_hours_rules {
            let rule = compile(parser.hours.group().field(), rule)?;
            parser.hours = parser.hours.with_rule(rule);
        }

        debug!(
            "Payslip parser: {} pay-period rules, {} hours rules",
            parser.period.group().rules().len(),
            parser.hours.group().rules().len()
        );

        Ok(parser)
    }

    /// Extract all payslip fields from text.
    pub fn extract_fields(&self, text: &str) -> PayslipFields {
        let period = self.period.extract(text);
        let total_hours_worked = self.hours.extract(text);

        debug!(
            "Extracted pay period {:?} - {:?}, hours {:?}",
            period.start, period.end, total_hours_worked
        );

        PayslipFields {
            pay_period_start: period.start,
            pay_period_end: period.end,
            total_hours_worked,
        }
    }
}

fn compile(field: &str, rule: &RuleConfig) -> Result<PatternRule, ExtractionError> {
    PatternRule::compile(field, &rule.pattern, rule.arity)
}

/// Extract payslip fields using the built-in rules.
pub fn extract_fields(text: &str) -> PayslipFields {
    DEFAULT_PARSER.extract_fields(text)
}
