//! Built-in regex patterns for payslip field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Labeled range: "Pay Period: 23 September 2024 - 06 October 2024"
    pub static ref PAY_PERIOD_RANGE: Regex = Regex::new(
        r"Pay Period\s*[:\-]?\s*(\d{1,2} \w+ \d{4}) - (\d{1,2} \w+ \d{4})"
    ).unwrap();

    // Bare numeric dates: "21/10/2024"
    pub static ref DATE_DMY_SLASH: Regex = Regex::new(
        r"\b\d{1,2}/\d{1,2}/\d{4}\b"
    ).unwrap();

    // "Ordinary Hours 48.0000"
    pub static ref ORDINARY_HOURS: Regex = Regex::new(
        r"Ordinary Hours\s+(\d+\.\d{4})"
    ).unwrap();

    // "Quantity 76.00"
    pub static ref QUANTITY_HOURS: Regex = Regex::new(
        r"Quantity\s+(\d+\.\d{2})"
    ).unwrap();
}
