// File: src/session.rs
// Purpose: Form session owning the field and error stores

use crate::field::{FieldRecord, FileData};
use crate::rules::Rules;
use campo_validation::MessageCatalog;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// One form's transient state: the field mapping, the error mapping and the
/// per-field generation counters for in-flight file batches.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub(crate) fields: HashMap<String, FieldRecord>,
    /// Registration order; submission iterates fields in this order
    pub(crate) order: Vec<String>,
    pub(crate) errors: HashMap<String, String>,
    pub(crate) generations: HashMap<String, u64>,
}

/// Handle to one form instance's state.
///
/// Cheap to clone; all clones share the same stores. State lives for the
/// lifetime of the owning form and is dropped with the last handle, so
/// nothing leaks across unrelated forms.
#[derive(Debug, Clone)]
pub struct FormSession {
    pub(crate) inner: Arc<Mutex<SessionState>>,
    pub(crate) catalog: Arc<MessageCatalog>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    /// Fresh session with the built-in (Spanish) message catalog
    pub fn new() -> Self {
        Self::with_messages(MessageCatalog::default())
    }

    /// Fresh session with an overridden message catalog
    pub fn with_messages(catalog: MessageCatalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionState::default())),
            catalog: Arc::new(catalog),
        }
    }

    pub(crate) fn state(&self) -> MutexGuard<'_, SessionState> {
        self.inner.lock().expect("form session state poisoned")
    }

    /// Register a field, or update its registration.
    ///
    /// Idempotent with respect to structurally equal rules: re-binding with
    /// the same descriptor leaves the record untouched, so a re-render does
    /// not reset the value. A different descriptor replaces the record with
    /// `value = rules.value ?? default_value ?? ""`.
    pub fn register(&self, name: &str, rules: Rules, default_value: Option<&str>) {
        let mut state = self.state();
        if let Some(existing) = state.fields.get(name) {
            if existing.rules.same_shape(&rules) {
                return;
            }
            tracing::debug!(field = name, "replacing registration, rules changed");
        }
        let value = rules
            .value
            .clone()
            .or_else(|| default_value.map(str::to_string))
            .unwrap_or_default();
        if !state.fields.contains_key(name) {
            state.order.push(name.to_string());
        }
        state
            .fields
            .insert(name.to_string(), FieldRecord::with_value(value, rules));
    }

    /// Merge a new value into the field's record, creating one if absent
    pub fn set_value(&self, name: &str, value: impl Into<String>) {
        let mut state = self.state();
        if !state.fields.contains_key(name) {
            state.order.push(name.to_string());
        }
        state.fields.entry(name.to_string()).or_default().value = value.into();
    }

    /// Merge a file sequence into the field's record, creating one if absent
    pub fn set_files(&self, name: &str, files: Vec<FileData>) {
        let mut state = self.state();
        if !state.fields.contains_key(name) {
            state.order.push(name.to_string());
        }
        state.fields.entry(name.to_string()).or_default().files = Some(files);
    }

    /// Replace a field's record wholesale
    pub fn insert_field(&self, name: &str, record: FieldRecord) {
        let mut state = self.state();
        if !state.fields.contains_key(name) {
            state.order.push(name.to_string());
        }
        state.fields.insert(name.to_string(), record);
    }

    /// Delete a field and its error entry.
    ///
    /// The field's generation counter is kept: an in-flight file batch
    /// dispatched before the removal must stay stale against any batch a
    /// later re-registration dispatches.
    pub fn remove(&self, name: &str) {
        let mut state = self.state();
        state.fields.remove(name);
        state.order.retain(|entry| entry != name);
        state.errors.remove(name);
    }

    /// Drop every field and every error; the session is as freshly created.
    ///
    /// Generation counters survive the reset, keeping them monotonic for
    /// the session's whole lifetime — a batch still in flight from before
    /// the reset can never match a post-reset generation.
    pub fn reset(&self) {
        let mut state = self.state();
        let generations = std::mem::take(&mut state.generations);
        *state = SessionState {
            generations,
            ..SessionState::default()
        };
        tracing::debug!("form session reset");
    }

    /// Current error message for a field, empty string when there is none
    pub fn get_error(&self, name: &str) -> String {
        self.state().errors.get(name).cloned().unwrap_or_default()
    }

    pub fn set_error(&self, name: &str, message: impl Into<String>) {
        self.state()
            .errors
            .insert(name.to_string(), message.into());
    }

    pub fn clear_error(&self, name: &str) {
        self.state().errors.insert(name.to_string(), String::new());
    }

    /// Snapshot of the field mapping
    pub fn fields(&self) -> HashMap<String, FieldRecord> {
        self.state().fields.clone()
    }

    /// Snapshot of every field's current text value; this is the mapping
    /// handed to custom validation callbacks
    pub fn values(&self) -> HashMap<String, String> {
        self.state()
            .fields
            .iter()
            .map(|(name, record)| (name.clone(), record.value.clone()))
            .collect()
    }

    /// Snapshot of the error mapping
    pub fn errors(&self) -> HashMap<String, String> {
        self.state().errors.clone()
    }

    /// The effective message catalog
    pub fn messages(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Start a new file batch for the field and return its generation tag
    pub(crate) fn bump_generation(&self, name: &str) -> u64 {
        let mut state = self.state();
        let counter = state.generations.entry(name.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Commit a resolved file batch unless a newer one superseded it.
    /// Returns whether the commit happened.
    pub(crate) fn commit_files_if_current(
        &self,
        name: &str,
        generation: u64,
        files: Vec<FileData>,
    ) -> bool {
        let mut state = self.state();
        if state.generations.get(name).copied() != Some(generation) {
            return false;
        }
        if !state.fields.contains_key(name) {
            state.order.push(name.to_string());
        }
        state.fields.entry(name.to_string()).or_default().files = Some(files);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rules;
    use pretty_assertions::assert_eq;

    #[test]
    fn register_is_idempotent_for_equal_rules() {
        let session = FormSession::new();
        session.register("name", Rules::new().required(), None);
        session.set_value("name", "Ana");
        session.register("name", Rules::new().required(), None);
        assert_eq!(session.values()["name"], "Ana");
    }

    #[test]
    fn register_replaces_record_when_rules_change() {
        let session = FormSession::new();
        session.register("name", Rules::new().required(), None);
        session.set_value("name", "Ana");
        session.register("name", Rules::new().required().min_length(3), None);
        assert_eq!(session.values()["name"], "");
    }

    #[test]
    fn registered_value_prefers_rules_value_over_default() {
        let session = FormSession::new();
        session.register("a", Rules::new().value("from-rules"), Some("default"));
        session.register("b", Rules::new(), Some("default"));
        session.register("c", Rules::new(), None);
        assert_eq!(session.values()["a"], "from-rules");
        assert_eq!(session.values()["b"], "default");
        assert_eq!(session.values()["c"], "");
    }

    #[test]
    fn reset_clears_fields_and_errors() {
        let session = FormSession::new();
        session.register("name", Rules::new().required(), None);
        session.set_error("name", "boom");
        session.reset();
        assert_eq!(session.fields().len(), 0);
        assert_eq!(session.errors().len(), 0);
    }

    #[test]
    fn remove_drops_field_and_error() {
        let session = FormSession::new();
        session.register("a", Rules::new(), None);
        session.register("b", Rules::new(), None);
        session.set_error("a", "boom");
        session.remove("a");
        assert!(!session.fields().contains_key("a"));
        assert_eq!(session.get_error("a"), "");
        assert!(session.fields().contains_key("b"));
    }

    #[test]
    fn stale_file_batches_are_discarded() {
        let session = FormSession::new();
        session.register("upload", Rules::new().file(), None);
        let first = session.bump_generation("upload");
        let second = session.bump_generation("upload");

        let newer = vec![FileData {
            name: "b.txt".into(),
            size: 1,
            content: vec![b'b'],
        }];
        assert!(session.commit_files_if_current("upload", second, newer.clone()));
        // The batch dispatched first resolves last; it must not overwrite
        assert!(!session.commit_files_if_current(
            "upload",
            first,
            vec![FileData {
                name: "a.txt".into(),
                size: 1,
                content: vec![b'a'],
            }]
        ));
        assert_eq!(session.fields()["upload"].files, Some(newer));
    }

    #[test]
    fn generations_stay_monotonic_across_reset() {
        let session = FormSession::new();
        session.register("upload", Rules::new().file(), None);
        let before_reset = session.bump_generation("upload");

        session.reset();
        session.register("upload", Rules::new().file(), None);
        let after_reset = session.bump_generation("upload");
        assert!(after_reset > before_reset);

        let fresh = vec![FileData {
            name: "new.txt".into(),
            size: 3,
            content: b"new".to_vec(),
        }];
        assert!(session.commit_files_if_current("upload", after_reset, fresh.clone()));
        // A batch dispatched before the reset resolves late; its tag must
        // still read as stale
        assert!(!session.commit_files_if_current(
            "upload",
            before_reset,
            vec![FileData {
                name: "old.txt".into(),
                size: 3,
                content: b"old".to_vec(),
            }]
        ));
        assert_eq!(session.fields()["upload"].files, Some(fresh));
    }

    #[test]
    fn generations_stay_monotonic_across_remove() {
        let session = FormSession::new();
        session.register("upload", Rules::new().file(), None);
        let before_remove = session.bump_generation("upload");

        session.remove("upload");
        session.register("upload", Rules::new().file(), None);
        let after_remove = session.bump_generation("upload");
        assert!(after_remove > before_remove);
        assert!(!session.commit_files_if_current("upload", before_remove, Vec::new()));
    }
}
