// File: src/validators.rs
// Purpose: Syntax validators (regex and calendar checks, no form state)

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

// Email validation regex
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

// URL validation regex (any scheme://, no whitespace)
static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s]+$").unwrap());

// Grouped-decimal money syntax: integer part in groups of up to three digits
// separated by periods, optional comma plus one or two fraction digits
static MONEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}(\.\d{3})*(,\d{1,2})?$").unwrap());

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Validate email format
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// Validate URL format
pub fn is_valid_url(value: &str) -> bool {
    URL_REGEX.is_match(value)
}

/// Validate grouped-decimal money syntax, e.g. `1.234.567,89`
pub fn is_money_format(value: &str) -> bool {
    MONEY_REGEX.is_match(value)
}

/// Validate that the value parses to a real calendar date
pub fn is_valid_date(value: &str) -> bool {
    DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(value.trim(), format).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ana@example.com", true)]
    #[case("ana.perez+tag@sub.example.co", true)]
    #[case("ana@example", false)]
    #[case("@example.com", false)]
    #[case("", false)]
    fn email_syntax(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(value), expected);
    }

    #[rstest]
    #[case("https://example.com/path", true)]
    #[case("ftp://files.example.com", true)]
    #[case("example.com", false)]
    #[case("https://with space.com", false)]
    fn url_syntax(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_url(value), expected);
    }

    #[rstest]
    #[case("1.234.567,89", true)]
    #[case("999", true)]
    #[case("1.000", true)]
    #[case("12,5", true)]
    #[case("1234", false)]
    #[case("1.23", false)]
    #[case("1.000,123", false)]
    #[case("", false)]
    fn money_syntax(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_money_format(value), expected);
    }

    #[rstest]
    #[case("2024-02-29", true)]
    #[case("29/02/2024", true)]
    #[case("2023-02-29", false)]
    #[case("31/04/2024", false)]
    #[case("no-date", false)]
    fn calendar_dates(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_date(value), expected);
    }
}
