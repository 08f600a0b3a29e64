//! Total hours worked extraction.

use super::patterns::{ORDINARY_HOURS, QUANTITY_HOURS};
use super::{FieldExtractor, PatternGroup, PatternRule, RuleMatch};

/// Total hours extractor.
#[derive(Debug, Clone)]
pub struct HoursExtractor {
    group: PatternGroup,
}

impl HoursExtractor {
    pub fn new() -> Self {
        Self {
            group: PatternGroup::new(
                "total_hours_worked",
                vec![
                    PatternRule::single(ORDINARY_HOURS.clone()),
                    PatternRule::single(QUANTITY_HOURS.clone()),
                ],
            ),
        }
    }

    /// Append a rule tried after the built-in ones.
    pub fn with_rule(mut self, rule: PatternRule) -> Self {
        self.group.push(rule);
        self
    }

    /// The underlying rule group.
    pub fn group(&self) -> &PatternGroup {
        &self.group
    }
}

impl Default for HoursExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for HoursExtractor {
    type Output = Option<String>;

    fn extract(&self, text: &str) -> Option<String> {
        match self.group.evaluate(text, 1)? {
            RuleMatch::Single(values) => values.into_iter().next(),
            RuleMatch::Paired(first, _) => Some(first),
        }
    }
}

/// Extract total hours worked using the built-in rules.
pub fn extract_total_hours(text: &str) -> Option<String> {
    HoursExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::rules::Arity;

    #[test]
    fn test_ordinary_hours() {
        assert_eq!(
            extract_total_hours("Ordinary Hours   48.0000   $1,440.00").as_deref(),
            Some("48.0000")
        );
    }

    #[test]
    fn test_ordinary_hours_wins_over_quantity() {
        let text = "Description Quantity 76.00\nOrdinary Hours 48.0000";
        assert_eq!(extract_total_hours(text).as_deref(), Some("48.0000"));
    }

    #[test]
    fn test_quantity_fallback() {
        assert_eq!(extract_total_hours("Quantity 76.00").as_deref(), Some("76.00"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "Quantity 76.00\nQuantity 4.50";
        assert_eq!(extract_total_hours(text).as_deref(), Some("76.00"));
    }

    #[test]
    fn test_wrong_precision_does_not_match() {
        // Ordinary Hours needs four fraction digits
        assert_eq!(extract_total_hours("Ordinary Hours 48.00"), None);
    }

    #[test]
    fn test_no_hours() {
        assert_eq!(extract_total_hours("Gross Pay 1,440.00"), None);
        assert_eq!(extract_total_hours(""), None);
    }

    #[test]
    fn test_extra_rule() {
        let extractor = HoursExtractor::new().with_rule(
            PatternRule::compile(
                "total_hours_worked",
                r"Hours Paid:\s*(\d+(?:\.\d+)?)",
                Arity::Single,
            )
            .unwrap(),
        );

        assert_eq!(extractor.extract("Hours Paid: 37.5").as_deref(), Some("37.5"));
        assert_eq!(
            extractor.extract("Hours Paid: 37.5\nQuantity 40.00").as_deref(),
            Some("40.00")
        );
    }
}
