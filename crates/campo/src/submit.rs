// File: src/submit.rs
// Purpose: Submission coordinator

use crate::field::SubmitValue;
use crate::session::FormSession;
use std::collections::HashMap;

/// Host event handed to the submission handler; carries the
/// default-action flag of the triggering form event.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl FormSession {
    /// Build the submission handler around a caller callback.
    ///
    /// The handler prevents the event's default action, re-validates every
    /// registered field in registration order and aggregates with logical
    /// AND. Every field is validated even after an earlier one fails, so the
    /// error store ends up reflecting the whole form, not just the first
    /// problem. Only when all fields pass is `on_submit` invoked with the
    /// collected values; money-rule values are handed off with the thousands
    /// grouping stripped.
    pub fn submit<F>(&self, on_submit: F) -> impl Fn(&mut SubmitEvent)
    where
        F: Fn(HashMap<String, SubmitValue>),
    {
        let session = self.clone();
        move |event: &mut SubmitEvent| {
            event.prevent_default();
            let (order, fields) = {
                let state = session.state();
                (state.order.clone(), state.fields.clone())
            };
            let mut all_valid = true;
            for name in &order {
                let record = &fields[name];
                all_valid &= session.validate(name, &record.value, Some(&record.rules));
            }
            if !all_valid {
                tracing::debug!(errors = ?session.errors(), "submission blocked");
                return;
            }
            let mut values = HashMap::new();
            for name in &order {
                let record = &fields[name];
                let value = if record.rules.file {
                    SubmitValue::Files(record.files.clone().unwrap_or_default())
                } else if record.rules.money {
                    SubmitValue::Text(record.value.replace('.', ""))
                } else {
                    SubmitValue::Text(record.value.clone())
                };
                values.insert(name.clone(), value);
            }
            on_submit(values);
        }
    }
}
