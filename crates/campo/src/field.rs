// File: src/field.rs
// Purpose: Field records, change events and submitted values

use crate::rules::Rules;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory descriptor of one read file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileData {
    pub name: String,
    pub size: u64,
    pub content: Vec<u8>,
}

/// One registered field: its current value, the optional multi-file
/// sequence, and the rules attached at registration time.
#[derive(Debug, Clone, Default)]
pub struct FieldRecord {
    pub value: String,
    /// Auxiliary sequence for multi-valued (file) fields
    pub files: Option<Vec<FileData>>,
    pub rules: Rules,
}

impl FieldRecord {
    pub fn with_value(value: impl Into<String>, rules: Rules) -> Self {
        Self {
            value: value.into(),
            files: None,
            rules,
        }
    }
}

/// What an input control reported on change.
///
/// Only the parts relevant to the bound field's rules are read: `checked`
/// for checkbox rules, `files` for file rules, `extra` when the binding was
/// created with an alternate value key, and `value` for everything else.
#[derive(Debug, Clone, Default)]
pub struct ChangeEvent {
    pub value: String,
    pub checked: bool,
    pub files: Vec<PathBuf>,
    /// Second-argument payload some component libraries pass alongside the
    /// event; consulted only when the binding has an alternate value key
    pub extra: HashMap<String, String>,
}

impl ChangeEvent {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn checked(checked: bool) -> Self {
        Self {
            checked,
            ..Self::default()
        }
    }

    pub fn files(paths: Vec<PathBuf>) -> Self {
        Self {
            files: paths,
            ..Self::default()
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// One entry of the value mapping handed to the submit callback
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubmitValue {
    Text(String),
    Files(Vec<FileData>),
}

impl SubmitValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SubmitValue::Text(text) => Some(text),
            SubmitValue::Files(_) => None,
        }
    }

    pub fn as_files(&self) -> Option<&[FileData]> {
        match self {
            SubmitValue::Text(_) => None,
            SubmitValue::Files(files) => Some(files),
        }
    }
}
