//! Form state and submit/reset orchestration.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::error::{FormError, Result};
use crate::rules::{GENERIC_MESSAGE, ValidationRule};
use crate::widget::WidgetValidator;

/// Field values keyed by field name.
pub type FieldValues = BTreeMap<String, Value>;

type SubmitFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>>>>;
type SubmitCallback = Box<dyn FnMut(FieldValues) -> SubmitFuture>;
type ResetCallback = Box<dyn FnMut()>;

/// Generic multi-field form state: current values against an immutable
/// initial snapshot, per-field errors, touched tracking, and guarded
/// submit/reset orchestration.
///
/// Validation failures are surfaced per-field through [`errors`]; a submit
/// callback failure is logged and swallowed at this boundary, so callers
/// observe it only through their own side effects.
///
/// [`errors`]: FormLifecycle::errors
pub struct FormLifecycle {
    values: FieldValues,
    initial: FieldValues,
    errors: BTreeMap<String, String>,
    touched: BTreeSet<String>,
    rules: BTreeMap<String, Vec<ValidationRule>>,
    widget: Option<Box<dyn WidgetValidator>>,
    on_submit: Option<SubmitCallback>,
    on_reset: Option<ResetCallback>,
    submitting: bool,
    valid: bool,
    dirty: bool,
}

impl FormLifecycle {
    /// Build a form over its initial values. The snapshot is kept for
    /// dirty tracking and [`reset_form`].
    ///
    /// [`reset_form`]: FormLifecycle::reset_form
    pub fn new(initial_values: FieldValues) -> Self {
        Self {
            values: initial_values.clone(),
            initial: initial_values,
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            rules: BTreeMap::new(),
            widget: None,
            on_submit: None,
            on_reset: None,
            submitting: false,
            valid: true,
            dirty: false,
        }
    }

    /// Append a validation rule for one field. Rules run in the order
    /// they were added; the first failure wins.
    #[must_use]
    pub fn with_rule(mut self, key: impl Into<String>, rule: ValidationRule) -> Self {
        self.rules.entry(key.into()).or_default().push(rule);
        self
    }

    /// Register the submit callback. It receives a snapshot copy of the
    /// values; its failure is logged and not propagated.
    #[must_use]
    pub fn with_on_submit<F, Fut>(mut self, mut callback: F) -> Self
    where
        F: FnMut(FieldValues) -> Fut + 'static,
        Fut: Future<Output = anyhow::Result<()>> + 'static,
    {
        self.on_submit = Some(Box::new(move |values| Box::pin(callback(values))));
        self
    }

    /// Register a callback invoked after every [`reset_form`].
    ///
    /// [`reset_form`]: FormLifecycle::reset_form
    #[must_use]
    pub fn with_on_reset(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_reset = Some(Box::new(callback));
        self
    }

    /// Attach the external widget validator consulted by `validate_form`.
    #[must_use]
    pub fn with_widget(mut self, widget: impl WidgetValidator + 'static) -> Self {
        self.widget = Some(Box::new(widget));
        self
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Current per-field error messages. Fields that pass have no entry.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    pub fn touched(&self) -> &BTreeSet<String> {
        &self.touched
    }

    pub fn is_touched(&self, key: &str) -> bool {
        self.touched.contains(key)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Outcome of the most recent whole-form validation.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether any field differs from its initial snapshot value.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Set one field's value, mark it touched, and validate it when it
    /// has rules.
    ///
    /// # Errors
    ///
    /// `UnknownField` when the key is absent from the initial snapshot;
    /// nothing is stored.
    pub fn set_field_value(&mut self, key: &str, value: Value) -> Result<()> {
        if !self.initial.contains_key(key) {
            return Err(FormError::UnknownField(key.to_string()));
        }
        self.values.insert(key.to_string(), value);
        self.touched.insert(key.to_string());
        if self.rules.contains_key(key) {
            self.validate_field(key);
        }
        self.recompute_dirty();
        Ok(())
    }

    /// Run one field's rules in order against its current value. Records
    /// the first failure's message (or a generic one when the rule gives
    /// none) and clears the field's error when all pass. Fields without
    /// rules always pass.
    pub fn validate_field(&mut self, key: &str) -> bool {
        let outcome = {
            let Some(rules) = self.rules.get(key) else {
                return true;
            };
            let value = self.values.get(key).cloned().unwrap_or(Value::Null);
            first_failure(rules, &value)
        };
        match outcome {
            Some(message) => {
                self.errors.insert(key.to_string(), message);
                false
            }
            None => {
                self.errors.remove(key);
                true
            }
        }
    }

    /// Validate every field that has rules — not just the touched ones —
    /// then consult the attached widget validator, if any. Updates
    /// [`is_valid`] and returns it.
    ///
    /// [`is_valid`]: FormLifecycle::is_valid
    pub async fn validate_form(&mut self) -> bool {
        let keys: Vec<String> = self.rules.keys().cloned().collect();
        let mut form_valid = true;
        for key in keys {
            if !self.validate_field(&key) {
                form_valid = false;
            }
        }
        if let Some(widget) = &mut self.widget {
            let verdict = widget.validate().await;
            form_valid = form_valid && verdict.valid;
        }
        self.valid = form_valid;
        form_valid
    }

    /// Validate everything and, when valid, hand a snapshot of the values
    /// to the submit callback.
    ///
    /// A call while a previous submit is still in flight is a no-op. The
    /// callback's failure is caught and logged; `is_submitting` is
    /// cleared in all cases.
    pub async fn handle_submit(&mut self) {
        if self.submitting {
            return;
        }
        let keys: Vec<String> = self.values.keys().cloned().collect();
        self.touched.extend(keys);

        if !self.validate_form().await {
            return;
        }

        self.submitting = true;
        if let Some(callback) = &mut self.on_submit {
            let future = callback(self.values.clone());
            if let Err(error) = future.await {
                tracing::error!(%error, "form submission failed");
            }
        }
        self.submitting = false;
    }

    /// Restore the initial snapshot, clear errors and touched state,
    /// reset the attached widget, and invoke the reset callback.
    pub fn reset_form(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
        if let Some(widget) = &mut self.widget {
            widget.reset();
        }
        self.dirty = false;
        if let Some(callback) = &mut self.on_reset {
            callback();
        }
    }

    fn recompute_dirty(&mut self) {
        self.dirty = self
            .initial
            .iter()
            .any(|(key, original)| self.values.get(key) != Some(original));
    }
}

fn first_failure(rules: &[ValidationRule], value: &Value) -> Option<String> {
    for rule in rules {
        if let Err(message) = rule(value) {
            if message.is_empty() {
                return Some(GENERIC_MESSAGE.to_string());
            }
            return Some(message);
        }
    }
    None
}
