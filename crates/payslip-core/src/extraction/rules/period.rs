//! Pay-period extraction.

use super::patterns::{DATE_DMY_SLASH, PAY_PERIOD_RANGE};
use super::{FieldExtractor, PatternGroup, PatternRule, RuleMatch};

/// Start and end of a pay period, as matched in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayPeriod {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl From<RuleMatch> for PayPeriod {
    fn from(found: RuleMatch) -> Self {
        match found {
            RuleMatch::Paired(start, end) => Self {
                start: Some(start),
                end: Some(end),
            },
            // Positional pairing: first occurrence starts the period, second ends it
            RuleMatch::Single(values) => {
                let mut values = values.into_iter();
                Self {
                    start: values.next(),
                    end: values.next(),
                }
            }
        }
    }
}

/// Pay-period extractor.
///
/// Tries a labeled date range first and falls back to the first two bare
/// `dd/mm/yyyy` dates in the text.
#[derive(Debug, Clone)]
pub struct PayPeriodExtractor {
    group: PatternGroup,
}

impl PayPeriodExtractor {
    pub fn new() -> Self {
        Self {
            group: PatternGroup::new(
                "pay_period",
                vec![
                    PatternRule::paired(PAY_PERIOD_RANGE.clone()),
                    PatternRule::single(DATE_DMY_SLASH.clone()),
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

impl Default for PayPeriodExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PayPeriodExtractor {
    type Output = PayPeriod;

    fn extract(&self, text: &str) -> PayPeriod {
        self.group
            .evaluate(text, 2)
            .map(PayPeriod::from)
            .unwrap_or_default()
    }
}

/// Extract the pay period using the built-in rules.
pub fn extract_pay_period(text: &str) -> PayPeriod {
    PayPeriodExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::rules::Arity;
    use pretty_assertions::assert_eq;

    fn period(start: Option<&str>, end: Option<&str>) -> PayPeriod {
        PayPeriod {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    #[test]
    fn test_labeled_range() {
        let text = "Employee: J. Smith\nPay Period: 23 September 2024 - 06 October 2024\n";
        assert_eq!(
            extract_pay_period(text),
            period(Some("23 September 2024"), Some("06 October 2024"))
        );
    }

    #[test]
    fn test_labeled_range_with_dash_label() {
        let text = "Pay Period - 1 July 2024 - 14 July 2024";
        assert_eq!(
            extract_pay_period(text),
            period(Some("1 July 2024"), Some("14 July 2024"))
        );
    }

    #[test]
    fn test_labeled_range_wins_over_bare_dates() {
        let text = "Paid on 08/10/2024\n\
                    Pay Period 23 September 2024 - 06 October 2024\n\
                    Printed 09/10/2024";
        assert_eq!(
            extract_pay_period(text),
            period(Some("23 September 2024"), Some("06 October 2024"))
        );
    }

    #[test]
    fn test_bare_dates_positional_pairing() {
        let text = "Period 21/10/2024 - 03/11/2024 Payment date 07/11/2024";
        assert_eq!(
            extract_pay_period(text),
            period(Some("21/10/2024"), Some("03/11/2024"))
        );
    }

    #[test]
    fn test_single_bare_date() {
        assert_eq!(
            extract_pay_period("Payment date 7/11/2024"),
            period(Some("7/11/2024"), None)
        );
    }

    #[test]
    fn test_dates_are_not_normalized() {
        // Not a calendar date, still carried verbatim
        assert_eq!(
            extract_pay_period("31/02/2024 and 99/99/2024"),
            period(Some("31/02/2024"), Some("99/99/2024"))
        );
    }

    #[test]
    fn test_no_dates() {
        assert_eq!(extract_pay_period("no payroll content"), PayPeriod::default());
        assert_eq!(extract_pay_period(""), PayPeriod::default());
    }

    #[test]
    fn test_extra_rule_is_tried_last() {
        let extractor = PayPeriodExtractor::new().with_rule(
            PatternRule::compile(
                "pay_period",
                r"From (\d{4}-\d{2}-\d{2}) to (\d{4}-\d{2}-\d{2})",
                Arity::Paired,
            )
            .unwrap(),
        );

        assert_eq!(
            extractor.extract("From 2024-10-21 to 2024-11-03"),
            period(Some("2024-10-21"), Some("2024-11-03"))
        );
        assert_eq!(
            extractor.extract("From 2024-10-21 to 2024-11-03, paid 07/11/2024"),
            period(Some("07/11/2024"), None)
        );
        assert_eq!(extractor.group().rules().len(), 3);
    }
}
