//! # campo
//!
//! Client-side form state and validation: a [`FormSession`] tracks named
//! field values, applies declarative per-field [`Rules`], produces
//! user-facing error messages from a configurable [`MessageCatalog`] and
//! exposes [`FieldProps`] handler bundles for binding to input controls.
//!
//! ## Quick start
//!
//! ```rust
//! use campo::{ChangeEvent, FormSession, Rules, SubmitEvent};
//!
//! let form = FormSession::new();
//!
//! let name = form.bind("name", Rules::new().required().min_length(2));
//! name.change(ChangeEvent::value("Ana"));
//!
//! let email = form.bind("email", Rules::new().required().email().on_blur());
//! email.change(ChangeEvent::value("ana@example.com"));
//! email.blur();
//!
//! let handler = form.submit(|values| {
//!     assert_eq!(values["name"].as_text(), Some("Ana"));
//! });
//! handler(&mut SubmitEvent::new());
//! ```
//!
//! Validation outcomes are never errors: failures land in the session's
//! error store (empty string means no error) and are read back through
//! [`FormSession::get_error`] or the binding's [`FieldProps::error`] view.
//! One session owns one form's lifecycle; [`FormSession::reset`] returns it
//! to the freshly-created state.

mod binding;
mod engine;
mod field;
mod rules;
mod session;
mod submit;

pub use binding::{ErrorView, FieldProps, FileReadError};
pub use field::{ChangeEvent, FieldRecord, FileData, SubmitValue};
pub use rules::{CustomValidator, Rules, Verdict};
pub use session::FormSession;
pub use submit::SubmitEvent;

// Re-export the pure validation layer for direct use
pub use campo_validation as validation;
pub use campo_validation::{MessageCatalog, MessageKey};
