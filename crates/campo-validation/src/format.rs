// File: src/format.rs
// Purpose: Display formatting for money and phone input

use once_cell::sync::Lazy;
use regex::Regex;

// Optional country code (1-3 digits, optional +) followed by a 3-3-4 grouping
static PHONE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+?\d{1,3})?(\d{3})(\d{3})(\d{4})$").unwrap());

/// Format a raw money string with thousands grouping.
///
/// Strips everything except digits and the decimal comma, then inserts a
/// period every three digits of the integer part, counting from the right:
/// `"1234567,89"` becomes `"1.234.567,89"`. Empty input yields empty output.
///
/// This is purely a display transform; it never fails and it never rejects
/// input. Syntax validation lives in [`crate::validators::is_money_format`].
pub fn format_money(raw: &str) -> String {
    let clean: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    if clean.is_empty() {
        return String::new();
    }
    let mut parts = clean.splitn(2, ',');
    let integer = parts.next().unwrap_or_default();
    let fraction = parts.next();
    let grouped = group_thousands(integer);
    match fraction {
        Some(fraction) => format!("{grouped},{fraction}"),
        None => grouped,
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Format a raw phone string as `[countryCode ]DDD-DDD-DDDD`.
///
/// Strips everything except digits, comma and the plus sign. If the result
/// matches an optional 1-3 digit country code followed by exactly ten digits,
/// it is rendered with the 3-3-4 grouping (`"+11234567890"` becomes
/// `"+1 123-456-7890"`). Anything else is returned stripped but unformatted
/// so partial input keeps flowing while the user types.
pub fn format_phone(raw: &str) -> String {
    let clean: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '+')
        .collect();
    match PHONE_SHAPE.captures(&clean) {
        Some(caps) => {
            let body = format!("{}-{}-{}", &caps[2], &caps[3], &caps[4]);
            match caps.get(1) {
                Some(country) => format!("{} {}", country.as_str(), body),
                None => body,
            }
        }
        None => clean,
    }
}
