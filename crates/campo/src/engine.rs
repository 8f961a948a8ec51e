// File: src/engine.rs
// Purpose: Ordered rule evaluation writing the error store

use crate::rules::{Rules, Verdict};
use crate::session::FormSession;
use campo_validation::{is_money_format, is_valid_date, is_valid_email, is_valid_url, MessageKey};

// Phone rule bounds on the raw value length, counted in characters like
// the min_length/max_length rules
const PHONE_MIN_LEN: usize = 6;
const PHONE_MAX_LEN: usize = 15;

impl FormSession {
    /// Evaluate a value against a field's rules.
    ///
    /// Rules are checked in a fixed priority order and the first failing one
    /// wins; later rules are not evaluated, so only one error is surfaced at
    /// a time. The outcome is always written to the error store: the failure
    /// message, or the empty string on success. Returns whether the value
    /// passed. Absent rules mean always-valid.
    ///
    /// The message for a failing rule is `rules.error_label` when set,
    /// otherwise the catalog template for that rule's failure kind with
    /// `{placeholder}` tokens substituted. A custom callback returning
    /// [`Verdict::Message`] supplies its text verbatim; an explicit message
    /// is not a default, so `error_label` does not replace it.
    ///
    /// # Panics
    ///
    /// Panics when `name` is empty; that is an integration bug, not a
    /// validation failure.
    pub fn validate(&self, name: &str, value: &str, rules: Option<&Rules>) -> bool {
        assert!(
            !name.is_empty(),
            "validate requires a non-empty field name"
        );
        let Some(rules) = rules else {
            self.clear_error(name);
            return true;
        };
        match self.first_failure(name, value, rules) {
            Some(message) => {
                self.set_error(name, message);
                false
            }
            None => {
                self.clear_error(name);
                true
            }
        }
    }

    fn first_failure(&self, name: &str, value: &str, rules: &Rules) -> Option<String> {
        let labeled = |key: MessageKey, substitutions: &[(&str, String)]| {
            rules
                .error_label
                .clone()
                .unwrap_or_else(|| self.catalog.render(key, substitutions))
        };

        if rules.required && value.trim().is_empty() {
            return Some(labeled(MessageKey::IsRequired, &[]));
        }
        if rules.url && !is_valid_url(value) {
            return Some(labeled(MessageKey::InvalidUrl, &[]));
        }
        if rules.phone && !(PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&value.chars().count()) {
            return Some(labeled(MessageKey::InvalidPhone, &[]));
        }
        if rules.money && !is_money_format(value) {
            return Some(labeled(MessageKey::IsTypeMoney, &[]));
        }
        if rules.min.is_some() || rules.max.is_some() {
            // Numeric coercion before comparison; unparsable input fails the
            // bound check rather than silently comparing as text
            let number = value.trim().parse::<f64>().ok();
            if let Some(min) = rules.min {
                if !number.is_some_and(|n| n >= min) {
                    return Some(labeled(MessageKey::Min, &[("min", display_bound(min))]));
                }
            }
            if let Some(max) = rules.max {
                if !number.is_some_and(|n| n <= max) {
                    return Some(labeled(MessageKey::Max, &[("max", display_bound(max))]));
                }
            }
        }
        if let Some(bound) = rules.min_length {
            if value.chars().count() < bound {
                return Some(labeled(
                    MessageKey::MinLength,
                    &[("minLength", bound.to_string())],
                ));
            }
        }
        if let Some(bound) = rules.max_length {
            if value.chars().count() > bound {
                return Some(labeled(
                    MessageKey::MaxLength,
                    &[("maxLength", bound.to_string())],
                ));
            }
        }
        if let Some(sibling) = &rules.is_equal {
            let sibling_value = self.values().get(sibling).cloned().unwrap_or_default();
            if value != sibling_value {
                return Some(labeled(MessageKey::FieldsNotMatch, &[]));
            }
        }
        if rules.email && !is_valid_email(value) {
            return Some(labeled(MessageKey::InvalidEmail, &[]));
        }
        if rules.date && !is_valid_date(value) {
            return Some(labeled(MessageKey::InvalidDate, &[]));
        }
        if let Some(callback) = &rules.validate {
            match callback(value, &self.values()) {
                Verdict::Pass => {}
                Verdict::Message(message) => return Some(message),
                Verdict::Fail => return Some(labeled(MessageKey::CustomValidation, &[])),
            }
        }
        if rules.checkbox && value != "true" {
            return Some(labeled(MessageKey::IsTypeCheckbox, &[]));
        }
        if rules.radio && value.trim().is_empty() {
            return Some(labeled(MessageKey::IsTypeRadio, &[]));
        }
        if rules.file && !self.has_files(name) {
            return Some(labeled(MessageKey::IsTypeFile, &[]));
        }
        None
    }

    fn has_files(&self, name: &str) -> bool {
        self.state()
            .fields
            .get(name)
            .and_then(|record| record.files.as_ref())
            .is_some_and(|files| !files.is_empty())
    }
}

fn display_bound(bound: f64) -> String {
    if bound.fract() == 0.0 {
        format!("{}", bound as i64)
    } else {
        bound.to_string()
    }
}
