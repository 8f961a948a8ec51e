// File: src/binding.rs
// Purpose: Field binding adapter and asynchronous file ingestion

use crate::field::{ChangeEvent, FileData};
use crate::rules::Rules;
use crate::session::FormSession;
use campo_validation::{format_money, format_phone};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinHandle;

/// A field's error as exposed to rendering code: the message itself, or a
/// bare presence flag when the field was registered with `error_boolean`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorView {
    Message(String),
    Flag(bool),
}

impl ErrorView {
    pub fn is_error(&self) -> bool {
        match self {
            ErrorView::Message(message) => !message.is_empty(),
            ErrorView::Flag(flag) => *flag,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorView::Message(message) => Some(message),
            ErrorView::Flag(_) => None,
        }
    }
}

/// One file of a batch failed to read; the batch commits nothing.
#[derive(Debug, Error)]
#[error("failed to read {path:?}: {source}")]
pub struct FileReadError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
}

/// The handler bundle for one bound field.
///
/// Produced by [`FormSession::bind`]; registering the field is a side effect
/// of being read, so simply binding on every render keeps the store current.
/// `value` is `None` for file-rule fields, which cannot be value-controlled.
#[derive(Debug, Clone)]
pub struct FieldProps {
    session: FormSession,
    name: String,
    rules: Rules,
    alt_value_key: Option<String>,
    pub value: Option<String>,
    pub error: ErrorView,
    /// `(alternate key, message)` mirror of the error, present when the
    /// field was registered with `helper_text`
    pub helper_text: Option<(String, String)>,
}

impl FormSession {
    /// Bind a field with no alternate value key and no default value
    pub fn bind(&self, name: &str, rules: Rules) -> FieldProps {
        self.bind_with(name, rules, None, None)
    }

    /// Bind a field, registering or updating it in the store.
    ///
    /// `alt_value_key` switches the change handler to pluck the value from
    /// the event's extra payload instead of the event value. `default_value`
    /// seeds the field when the rules carry no initial value.
    pub fn bind_with(
        &self,
        name: &str,
        rules: Rules,
        alt_value_key: Option<&str>,
        default_value: Option<&str>,
    ) -> FieldProps {
        self.register(name, rules.clone(), default_value);
        let message = self.get_error(name);
        let error = if rules.error_boolean {
            ErrorView::Flag(!message.is_empty())
        } else {
            ErrorView::Message(message.clone())
        };
        let helper_text = rules.helper_text.clone().map(|key| (key, message));
        let value = if rules.file {
            None
        } else {
            Some(self.values().get(name).cloned().unwrap_or_default())
        };
        FieldProps {
            session: self.clone(),
            name: name.to_string(),
            rules,
            alt_value_key: alt_value_key.map(str::to_string),
            value,
            error,
            helper_text,
        }
    }
}

impl FieldProps {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Blur handler: validates the stored value, but only when the field was
    /// registered with `on_blur`
    pub fn blur(&self) {
        if !self.rules.on_blur {
            return;
        }
        let value = self.stored_value();
        self.session.validate(&self.name, &value, Some(&self.rules));
    }

    /// Change handler. Commits the event's value to the store, dispatching
    /// on the field's rule type: file selections are read asynchronously and
    /// committed as a batch, checkbox state is stored as `"true"`/`"false"`,
    /// radio stores its configured fixed value, phone and money route
    /// through the formatter, and everything else stores the raw value (or
    /// the extra-payload entry when an alternate value key is configured).
    ///
    /// Returns the handle of any background work spawned for this change
    /// (the file batch read and/or the deferred re-validation); callers may
    /// ignore it. Re-validation under `validate_on_change` runs one
    /// scheduling tick after the commit so it always sees the new value.
    pub fn change(&self, event: ChangeEvent) -> Option<JoinHandle<()>> {
        if self.rules.file {
            return Some(self.spawn_file_batch(event.files));
        }
        let stored = if self.rules.checkbox {
            event.checked.to_string()
        } else if self.rules.radio {
            self.rules
                .radio_value
                .clone()
                .unwrap_or(event.value)
        } else if self.rules.phone {
            format_phone(&event.value)
        } else if self.rules.money {
            format_money(&event.value)
        } else if let Some(key) = &self.alt_value_key {
            event.extra.get(key).cloned().unwrap_or_default()
        } else {
            event.value
        };
        self.session.set_value(&self.name, stored);
        if self.rules.validate_on_change {
            return Some(self.spawn_deferred_validation());
        }
        None
    }

    fn spawn_deferred_validation(&self) -> JoinHandle<()> {
        let session = self.session.clone();
        let name = self.name.clone();
        let rules = self.rules.clone();
        tokio::spawn(async move {
            // One tick so the store reflects the commit before validating
            tokio::task::yield_now().await;
            let value = session.values().get(&name).cloned().unwrap_or_default();
            session.validate(&name, &value, Some(&rules));
        })
    }

    fn spawn_file_batch(&self, paths: Vec<PathBuf>) -> JoinHandle<()> {
        let generation = self.session.bump_generation(&self.name);
        let session = self.session.clone();
        let name = self.name.clone();
        let rules = self.rules.clone();
        tokio::spawn(async move {
            match read_files(&paths).await {
                Ok(files) => {
                    if !session.commit_files_if_current(&name, generation, files) {
                        tracing::debug!(field = %name, generation, "discarding stale file batch");
                        return;
                    }
                    if rules.validate_on_change {
                        tokio::task::yield_now().await;
                        let value = session.values().get(&name).cloned().unwrap_or_default();
                        session.validate(&name, &value, Some(&rules));
                    }
                }
                Err(error) => {
                    // Keep the field's previous selection untouched
                    tracing::error!(field = %name, %error, "file batch read failed");
                }
            }
        })
    }

    fn stored_value(&self) -> String {
        self.session
            .values()
            .get(&self.name)
            .cloned()
            .unwrap_or_default()
    }
}

/// Read every file of a selection concurrently. All-or-nothing: the first
/// failure rejects the whole batch.
async fn read_files(paths: &[PathBuf]) -> Result<Vec<FileData>, FileReadError> {
    let reads = paths.iter().map(|path| async move {
        let content = tokio::fs::read(path).await.map_err(|source| FileReadError {
            path: path.clone(),
            source,
        })?;
        Ok(FileData {
            name: file_name(path),
            size: content.len() as u64,
            content,
        })
    });
    futures::future::try_join_all(reads).await
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn binding_exposes_value_and_error() {
        let form = FormSession::new();
        form.set_error("name", "previo");
        let props = form.bind("name", Rules::new().required().value("Ana"));
        assert_eq!(props.value.as_deref(), Some("Ana"));
        assert_eq!(props.error, ErrorView::Message("previo".to_string()));
        assert!(props.error.is_error());
    }

    #[test]
    fn file_fields_are_not_value_controlled() {
        let form = FormSession::new();
        let props = form.bind("upload", Rules::new().file());
        assert_eq!(props.value, None);
    }

    #[test]
    fn error_boolean_yields_a_flag() {
        let form = FormSession::new();
        form.set_error("age", "El valor mínimo es 18");
        let props = form.bind("age", Rules::new().min(18.0).error_boolean());
        assert_eq!(props.error, ErrorView::Flag(true));
        assert_eq!(props.error.message(), None);
    }

    #[test]
    fn helper_text_mirrors_the_message_under_the_chosen_key() {
        let form = FormSession::new();
        form.set_error("mail", "El correo electrónico no es válido");
        let props = form.bind("mail", Rules::new().email().helper_text("helperText"));
        assert_eq!(
            props.helper_text,
            Some((
                "helperText".to_string(),
                "El correo electrónico no es válido".to_string()
            ))
        );
    }

    #[test]
    fn change_dispatches_on_rule_type() {
        let form = FormSession::new();

        let checkbox = form.bind("terms", Rules::new().checkbox());
        checkbox.change(ChangeEvent::checked(true));
        assert_eq!(form.values()["terms"], "true");

        let radio = form.bind("plan", Rules::new().radio().radio_value("pro"));
        radio.change(ChangeEvent::value("ignored"));
        assert_eq!(form.values()["plan"], "pro");

        let phone = form.bind("phone", Rules::new().phone());
        phone.change(ChangeEvent::value("+1 (123) 456-7890"));
        assert_eq!(form.values()["phone"], "+1 123-456-7890");

        let money = form.bind("amount", Rules::new().money());
        money.change(ChangeEvent::value("1234567,89"));
        assert_eq!(form.values()["amount"], "1.234.567,89");

        let plain = form.bind("name", Rules::new().required());
        plain.change(ChangeEvent::value("Ana"));
        assert_eq!(form.values()["name"], "Ana");
    }

    #[test]
    fn alt_value_key_plucks_from_the_extra_payload() {
        let form = FormSession::new();
        let props = form.bind_with("country", Rules::new(), Some("optionValue"), None);
        props.change(ChangeEvent::value("ignored").with_extra("optionValue", "CO"));
        assert_eq!(form.values()["country"], "CO");
    }

    #[test]
    fn blur_validates_only_when_enabled() {
        let form = FormSession::new();

        let silent = form.bind("a", Rules::new().required());
        silent.change(ChangeEvent::value(""));
        silent.blur();
        assert_eq!(form.get_error("a"), "");

        let eager = form.bind("b", Rules::new().required().on_blur());
        eager.change(ChangeEvent::value(""));
        eager.blur();
        assert_eq!(form.get_error("b"), "Este campo es requerido");
    }
}
