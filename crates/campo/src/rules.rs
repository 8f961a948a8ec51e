// File: src/rules.rs
// Purpose: Declarative per-field rule descriptor

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Outcome of a caller-supplied validation callback.
///
/// The three cases mirror what a custom check can decide: the value is fine,
/// the value is wrong with a specific message, or the value is wrong and the
/// catalog's generic custom-validation message should be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
    Message(String),
}

/// Caller-supplied predicate: receives the field value and a snapshot of all
/// current field values (for cross-field checks).
pub type CustomValidator = dyn Fn(&str, &HashMap<String, String>) -> Verdict + Send + Sync;

/// The validation/configuration descriptor attached to a field at
/// registration time.
///
/// A descriptor is fixed for the lifetime of one registration: re-binding a
/// field with a structurally different descriptor replaces the record and
/// resets its value. Structural equality is serialized-value equality; the
/// `validate` callback is excluded from the comparison, so swapping only the
/// callback does not trigger a re-registration.
#[derive(Clone, Default, Serialize)]
pub struct Rules {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub money: bool,
    pub phone: bool,
    pub email: bool,
    pub url: bool,
    pub date: bool,
    /// Name of the sibling field this value must equal
    pub is_equal: Option<String>,
    pub checkbox: bool,
    pub radio: bool,
    pub file: bool,
    /// Fixed value stored when a radio control fires (falls back to the
    /// event value when unset)
    pub radio_value: Option<String>,
    /// Initial value, taking precedence over the binding's default value
    pub value: Option<String>,
    /// Overrides the catalog message for any failing rule on this field
    pub error_label: Option<String>,
    pub on_blur: bool,
    pub validate_on_change: bool,
    /// Alternate output key the error message is mirrored under, for
    /// component libraries expecting a differently-named prop
    pub helper_text: Option<String>,
    /// Report the error as a presence flag instead of a message string
    pub error_boolean: bool,
    #[serde(skip)]
    pub validate: Option<Arc<CustomValidator>>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, bound: usize) -> Self {
        self.min_length = Some(bound);
        self
    }

    pub fn max_length(mut self, bound: usize) -> Self {
        self.max_length = Some(bound);
        self
    }

    pub fn min(mut self, bound: f64) -> Self {
        self.min = Some(bound);
        self
    }

    pub fn max(mut self, bound: f64) -> Self {
        self.max = Some(bound);
        self
    }

    pub fn money(mut self) -> Self {
        self.money = true;
        self
    }

    pub fn phone(mut self) -> Self {
        self.phone = true;
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn url(mut self) -> Self {
        self.url = true;
        self
    }

    pub fn date(mut self) -> Self {
        self.date = true;
        self
    }

    pub fn is_equal(mut self, sibling: impl Into<String>) -> Self {
        self.is_equal = Some(sibling.into());
        self
    }

    pub fn checkbox(mut self) -> Self {
        self.checkbox = true;
        self
    }

    pub fn radio(mut self) -> Self {
        self.radio = true;
        self
    }

    pub fn file(mut self) -> Self {
        self.file = true;
        self
    }

    pub fn radio_value(mut self, value: impl Into<String>) -> Self {
        self.radio_value = Some(value.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn error_label(mut self, label: impl Into<String>) -> Self {
        self.error_label = Some(label.into());
        self
    }

    pub fn on_blur(mut self) -> Self {
        self.on_blur = true;
        self
    }

    pub fn validate_on_change(mut self) -> Self {
        self.validate_on_change = true;
        self
    }

    pub fn helper_text(mut self, key: impl Into<String>) -> Self {
        self.helper_text = Some(key.into());
        self
    }

    pub fn error_boolean(mut self) -> Self {
        self.error_boolean = true;
        self
    }

    pub fn validate<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str, &HashMap<String, String>) -> Verdict + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(callback));
        self
    }

    /// Structural equality used by the re-registration check. The custom
    /// callback is not part of the shape.
    pub(crate) fn same_shape(&self, other: &Rules) -> bool {
        serde_json::to_value(self).ok() == serde_json::to_value(other).ok()
    }
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rules")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("money", &self.money)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("url", &self.url)
            .field("date", &self.date)
            .field("is_equal", &self.is_equal)
            .field("checkbox", &self.checkbox)
            .field("radio", &self.radio)
            .field("file", &self.file)
            .field("error_label", &self.error_label)
            .field("validate", &self.validate.as_ref().map(|_| "<callback>"))
            .finish_non_exhaustive()
    }
}
