//! Form state machine: values, touched/dirty flags, derived errors, and the
//! submission status of one form instance.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::FormError;

use super::rules::{Rule, first_error};
use super::value::{FieldErrors, FieldValue, FormValues};

/// Declared field: initial value plus ordered rule chain.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub initial: FieldValue,
    pub rules: Vec<Rule>,
}

/// Declarative description of a form.
#[derive(Debug, Clone)]
pub struct FormSchema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        initial: impl Into<FieldValue>,
        rules: Vec<Rule>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            initial: initial.into(),
            rules,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

/// Per-field interaction state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub value: FieldValue,
    /// Lost focus at least once, or a submit was attempted.
    pub touched: bool,
    /// Value changed since the form was created or reset.
    pub dirty: bool,
}

/// Where the external submission stands. Set by the caller around the
/// backend call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed { message: String },
}

/// A live form: schema plus field state and derived errors.
#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    fields: BTreeMap<String, FieldState>,
    errors: BTreeMap<String, String>,
    submit_attempted: bool,
    submission: SubmissionStatus,
}

impl FormState {
    pub fn new(schema: FormSchema) -> Self {
        let mut form = Self {
            fields: initial_fields(&schema),
            schema,
            errors: BTreeMap::new(),
            submit_attempted: false,
            submission: SubmissionStatus::Idle,
        };
        form.revalidate();
        form
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Update a field's value and recompute every field's error, so rules
    /// that read other fields stay current.
    pub fn set_value(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        let value = value.into();
        let state = self
            .fields
            .get_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        if !state.value.same_kind(&value) {
            return Err(FormError::WrongValueKind {
                field: field.to_string(),
                expected: state.value.kind(),
            });
        }
        state.value = value;
        state.dirty = true;

        self.revalidate();
        debug!(
            form = %self.schema.name,
            field,
            valid = !self.errors.contains_key(field),
            "Field value changed"
        );
        Ok(())
    }

    /// Mark a field as blurred. Value and error are left as they are.
    pub fn set_touched(&mut self, field: &str) -> Result<(), FormError> {
        let state = self
            .fields
            .get_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        state.touched = true;
        Ok(())
    }

    /// Validate everything and release the values only if all fields pass.
    pub fn attempt_submit(&mut self) -> Result<FormValues, FormError> {
        self.submit_attempted = true;
        for state in self.fields.values_mut() {
            state.touched = true;
        }
        self.revalidate();

        if self.errors.is_empty() {
            info!(form = %self.schema.name, "Form submitted");
            Ok(self.values())
        } else {
            let errors: FieldErrors = self
                .errors
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            info!(form = %self.schema.name, invalid = %errors, "Form submit rejected");
            Err(FormError::ValidationFailed(errors))
        }
    }

    pub fn field(&self, field: &str) -> Option<&FieldState> {
        self.fields.get(field)
    }

    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field).map(|s| &s.value)
    }

    /// Text value of `field`.
    pub fn text(&self, field: &str) -> Result<&str, FormError> {
        let value = self
            .value(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        value.as_text().ok_or_else(|| FormError::WrongValueKind {
            field: field.to_string(),
            expected: "text",
        })
    }

    /// Boolean value of `field`.
    pub fn flag(&self, field: &str) -> Result<bool, FormError> {
        let value = self
            .value(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        value.as_flag().ok_or_else(|| FormError::WrongValueKind {
            field: field.to_string(),
            expected: "boolean",
        })
    }

    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|(name, state)| (name.clone(), state.value.clone()))
            .collect()
    }

    /// Current error for `field`, whether or not it is shown.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Error to display for `field`: suppressed until the field is touched or
    /// a submit was attempted.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        let state = self.fields.get(field)?;
        if state.touched || self.submit_attempted {
            self.error(field)
        } else {
            None
        }
    }

    pub fn visible_errors(&self) -> FieldErrors {
        self.errors
            .iter()
            .filter(|(name, _)| self.visible_error(name).is_some())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionStatus::Pending
    }

    /// Mark the external submission as in flight. Rejects a second begin
    /// for callers that hold the form between begin and finish.
    pub fn begin_submission(&mut self) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::SubmissionInProgress);
        }
        self.submission = SubmissionStatus::Pending;
        Ok(())
    }

    /// Record the outcome of the external submission.
    pub fn finish_submission(&mut self, outcome: Result<(), String>) {
        self.submission = match outcome {
            Ok(()) => SubmissionStatus::Succeeded,
            Err(message) => {
                warn!(form = %self.schema.name, %message, "Submission failed");
                SubmissionStatus::Failed { message }
            }
        };
    }

    /// Back to initial values with nothing touched.
    pub fn reset(&mut self) {
        self.fields = initial_fields(&self.schema);
        self.submit_attempted = false;
        self.submission = SubmissionStatus::Idle;
        self.revalidate();
    }

    fn revalidate(&mut self) {
        let values = self.values();
        for spec in &self.schema.fields {
            let Some(value) = values.get(&spec.name) else {
                continue;
            };
            match first_error(&spec.rules, value, &values) {
                Some(message) => {
                    self.errors.insert(spec.name.clone(), message);
                }
                None => {
                    self.errors.remove(&spec.name);
                }
            }
        }
    }
}

fn initial_fields(schema: &FormSchema) -> BTreeMap<String, FieldState> {
    schema
        .fields
        .iter()
        .map(|spec| {
            (
                spec.name.clone(),
                FieldState {
                    value: spec.initial.clone(),
                    touched: false,
                    dirty: false,
                },
            )
        })
        .collect()
}
