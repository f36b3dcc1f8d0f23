//! # Form Session
//!
//! A [`FormSession`] is the state behind one rendered form: the compiled
//! schema, the current value, the current field messages and the form's
//! own [`IdSequence`]. It is a [`PathChanged`] sink, so array operations and
//! plain field edits flow through the same path: rebuild the value
//! copy-on-write, revalidate, and emit a [`FormEvent`].

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use sform_core::{FormError, FormPath, IdSequence};
use sform_schema::{
    editor_for_schema, empty_value, schema_at_path, EngineConfig, FormAnnotations,
    SchemaValidationError, SchemaValidator, ValidationErrors,
};

use crate::array::{self, ArrayMutation, ArrayOp, PathChanged};
use crate::value::{value_at_path, with_value_at_path};

/// Error raised while building or editing a form.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Validation(#[from] SchemaValidationError),
}

/// What changed in a form after one edit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEvent {
    /// The path that was edited.
    pub path: FormPath,
    /// The whole form value after the edit.
    pub value: Value,
    /// Field messages for the new value.
    pub errors: ValidationErrors,
    /// The new value at `path`.
    pub path_value: Value,
    /// Set when the edit was an array operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<ArrayOp>,
}

#[derive(Debug)]
pub struct FormSession {
    validator: SchemaValidator,
    value: Value,
    errors: ValidationErrors,
    ids: IdSequence,
}

impl FormSession {
    /// Compile `schema` and validate `initial` against it.
    ///
    /// # Errors
    ///
    /// [`SessionError::Validation`] when the schema does not compile or a
    /// failure cannot be described.
    pub fn new(schema: &Value, config: &EngineConfig, initial: Value) -> Result<Self, SessionError> {
        let validator = SchemaValidator::new(schema, config)?;
        Self::with_validator(validator, initial)
    }

    /// Start a form at the empty value of its root schema, following a root
    /// `$ref` to the node it names.
    pub fn empty(schema: &Value, config: &EngineConfig) -> Result<Self, SessionError> {
        let validator = SchemaValidator::new(schema, config)?;
        let initial = empty_value(schema_at_path(validator.schema(), &FormPath::root()).ok());
        Self::with_validator(validator, initial)
    }

    fn with_validator(validator: SchemaValidator, initial: Value) -> Result<Self, SessionError> {
        let errors = validator.validation_errors(&initial)?;
        Ok(Self {
            validator,
            value: initial,
            errors,
            ids: IdSequence::new(),
        })
    }

    /// The compiled (normalized) schema.
    pub fn schema(&self) -> &Value {
        self.validator.schema()
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn value_at(&self, path: &FormPath) -> Option<&Value> {
        value_at_path(&self.value, path)
    }

    /// Mint an element id unique within this form.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.ids.next_id(prefix)
    }

    /// Control identifier for the field at `path`.
    pub fn editor_at(&self, path: &FormPath) -> Result<String, FormError> {
        editor_for_schema(schema_at_path(self.schema(), path)?)
    }

    /// Initial value for a field at `path` that is being revealed.
    pub fn empty_value_at(&self, path: &FormPath) -> Value {
        empty_value(schema_at_path(self.schema(), path).ok())
    }

    /// Replace the value at `path`, revalidate, and describe the result.
    ///
    /// # Errors
    ///
    /// [`SessionError::Form`] when `path` cannot be written into the current
    /// value; the session is unchanged in that case.
    pub fn update(
        &mut self,
        path: &FormPath,
        path_value: Value,
        op: Option<ArrayOp>,
    ) -> Result<FormEvent, SessionError> {
        let value = with_value_at_path(&self.value, path, path_value.clone())?;
        let errors = self.validator.validation_errors(&value)?;
        tracing::debug!(
            path = %path,
            op = op.map(|op| op.as_str()),
            errors = errors.len(),
            "form value changed"
        );

        self.value = value;
        self.errors = errors;
        Ok(FormEvent {
            path: path.clone(),
            value: self.value.clone(),
            errors: self.errors.clone(),
            path_value,
            op,
        })
    }

    /// Run an array operation on the array at `path`.
    ///
    /// Returns `None` for a reorder at the array's boundary, which changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// - [`FormError::ControlNotAllowed`] when the array's schema does not
    ///   offer the operation's control (or is read-only).
    /// - [`FormError::NotAnArray`] / [`FormError::IndexOutOfBounds`] from
    ///   the operation itself.
    pub fn apply_array_op(
        &mut self,
        path: &FormPath,
        mutation: ArrayMutation,
    ) -> Result<Option<FormEvent>, SessionError> {
        let array_schema = schema_at_path(self.schema(), path)?;
        let control = mutation.op().control();
        if !FormAnnotations::from_schema(array_schema)?.allows(control) {
            return Err(FormError::ControlNotAllowed {
                control: control.to_string(),
                path: path.display_path(),
            }
            .into());
        }

        let current = self.value_at(path).cloned().unwrap_or(Value::Null);
        let next_index = current.as_array().map_or(0, Vec::len);
        let item_schema = schema_at_path(self.schema(), &path.child(next_index.to_string()))
            .ok()
            .cloned();

        array::apply_array_op(self, path, &current, mutation, item_schema.as_ref())?.transpose()
    }
}

impl PathChanged for FormSession {
    type Output = Result<FormEvent, SessionError>;

    fn path_changed(&mut self, path: &FormPath, value: Value, op: Option<ArrayOp>) -> Self::Output {
        self.update(path, value, op)
    }
}
