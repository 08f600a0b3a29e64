//! Rule-based field extractors for payslips.
//!
//! Each logical field owns a [`PatternGroup`]: an ordered list of
//! [`PatternRule`]s evaluated first-match-wins. Supporting a new payslip
//! layout means appending a rule to a group.

pub mod hours;
pub mod patterns;
pub mod period;

pub use hours::{extract_total_hours, HoursExtractor};
pub use patterns::*;
pub use period::{extract_pay_period, PayPeriod, PayPeriodExtractor};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ExtractionError;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text. Absent fields are represented in the
    /// output, never as an error.
    fn extract(&self, text: &str) -> Self::Output;
}

/// How a rule's captures map to field values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    /// One value per match: capture group 1 if the pattern has one,
    /// otherwise the whole match.
    #[default]
    Single,
    /// Two values (groups 1 and 2) from a single match.
    Paired,
}

/// Values produced by the winning rule of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleMatch {
    /// Both ends of a labeled range, from the first match.
    Paired(String, String),
    /// Single values in order of appearance.
    Single(Vec<String>),
}

/// A regular expression together with its arity.
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    arity: Arity,
}

impl PatternRule {
    /// Create a rule from an already compiled regex.
    pub fn new(regex: Regex, arity: Arity) -> Self {
        Self { regex, arity }
    }

    /// Create a single-capture rule.
    pub fn single(regex: Regex) -> Self {
        Self::new(regex, Arity::Single)
    }

    /// Create a paired-capture rule.
    pub fn paired(regex: Regex) -> Self {
        Self::new(regex, Arity::Paired)
    }

    /// Compile a rule from user input.
    ///
    /// Paired rules must declare at least two capture groups.
    pub fn compile(field: &str, pattern: &str, arity: Arity) -> Result<Self, ExtractionError> {
        let invalid = |reason: String| ExtractionError::InvalidPattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            reason,
        };

        let regex = Regex::new(pattern).map_err(|e| invalid(e.to_string()))?;

        // captures_len counts the implicit whole-match group
        if arity == Arity::Paired && regex.captures_len() < 3 {
            return Err(invalid(
                "paired rules need two capture groups".to_string(),
            ));
        }

        Ok(Self::new(regex, arity))
    }

    /// The rule's pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Apply the rule to `text`, collecting at most `limit` single values.
    ///
    /// Returns `None` when the rule does not match at all.
    pub fn apply(&self, text: &str, limit: usize) -> Option<RuleMatch> {
        match self.arity {
            Arity::Paired => self.regex.captures_iter(text).find_map(|caps| {
                let start = caps.get(1)?;
                let end = caps.get(2)?;
                Some(RuleMatch::Paired(
                    start.as_str().to_string(),
                    end.as_str().to_string(),
                ))
            }),
            Arity::Single => {
                let group = if self.regex.captures_len() > 1 { 1 } else { 0 };
                let values: Vec<String> = self
                    .regex
                    .captures_iter(text)
                    .filter_map(|caps| caps.get(group).map(|m| m.as_str().to_string()))
                    .take(limit)
                    .collect();

                if values.is_empty() {
                    None
                } else {
                    Some(RuleMatch::Single(values))
                }
            }
        }
    }
}

/// Ordered candidate rules for one logical field.
#[derive(Debug, Clone)]
pub struct PatternGroup {
    field: &'static str,
    rules: Vec<PatternRule>,
}

impl PatternGroup {
    /// Create a group for `field` with the given rules, in priority order.
    pub fn new(field: &'static str, rules: Vec<PatternRule>) -> Self {
        Self { field, rules }
    }

    /// Name of the field this group extracts.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Append a rule with the lowest priority.
    pub fn push(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    /// Evaluate rules in order and return the first rule's match.
    ///
    /// Later rules are never consulted once one rule matches.
    pub fn evaluate(&self, text: &str, limit: usize) -> Option<RuleMatch> {
        self.rules.iter().enumerate().find_map(|(index, rule)| {
            let found = rule.apply(text, limit)?;
            trace!("{}: rule {} ({}) matched", self.field, index, rule.as_str());
            Some(found)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rule(pattern: &str, arity: Arity) -> PatternRule {
        PatternRule::compile("test", pattern, arity).unwrap()
    }

    #[test]
    fn test_single_rule_uses_first_group() {
        let rule = rule(r"Hours\s+(\d+)", Arity::Single);
        assert_eq!(
            rule.apply("Hours 12 and Hours 14", 5),
            Some(RuleMatch::Single(vec!["12".to_string(), "14".to_string()]))
        );
    }

    #[test]
    fn test_single_rule_without_group_uses_whole_match() {
        let rule = rule(r"\d{2}-\d{2}", Arity::Single);
        assert_eq!(
            rule.apply("from 01-02 to 03-04", 5),
            Some(RuleMatch::Single(vec!["01-02".to_string(), "03-04".to_string()]))
        );
    }

    #[test]
    fn test_single_rule_respects_limit() {
        let rule = rule(r"\d", Arity::Single);
        assert_eq!(
            rule.apply("1 2 3 4", 2),
            Some(RuleMatch::Single(vec!["1".to_string(), "2".to_string()]))
        );
    }

    #[test]
    fn test_paired_rule_takes_first_match() {
        let rule = rule(r"(\d+)\.\.(\d+)", Arity::Paired);
        assert_eq!(
            rule.apply("1..2 then 3..4", 5),
            Some(RuleMatch::Paired("1".to_string(), "2".to_string()))
        );
    }

    #[test]
    fn test_no_match() {
        let rule = rule(r"Hours\s+(\d+)", Arity::Single);
        assert_eq!(rule.apply("nothing here", 5), None);
        assert_eq!(rule.apply("", 5), None);
    }

    #[test]
    fn test_group_first_match_wins() {
        let group = PatternGroup::new(
            "test",
            vec![rule(r"A(\d)", Arity::Single), rule(r"B(\d)", Arity::Single)],
        );

        assert_eq!(
            group.evaluate("B1 A2", 5),
            Some(RuleMatch::Single(vec!["2".to_string()]))
        );
        assert_eq!(
            group.evaluate("B1 B3", 5),
            Some(RuleMatch::Single(vec!["1".to_string(), "3".to_string()]))
        );
        assert_eq!(group.evaluate("C1", 5), None);
    }

    #[test]
    fn test_compile_rejects_invalid_regex() {
        let err = PatternRule::compile("hours", r"Hours (\d+", Arity::Single).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::InvalidPattern { ref field, .. } if field == "hours"
        ));
    }

    #[test]
    fn test_compile_rejects_paired_without_groups() {
        let err = PatternRule::compile("period", r"(\d+)", Arity::Paired).unwrap_err();
        assert!(err.to_string().contains("two capture groups"));
    }

    #[test]
    fn test_arity_serde() {
        assert_eq!(serde_json::to_string(&Arity::Paired).unwrap(), "\"paired\"");
        let arity: Arity = serde_json::from_str("\"single\"").unwrap();
        assert_eq!(arity, Arity::Single);
    }
}
