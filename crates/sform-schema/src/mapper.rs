//! # Validation Failure Mapping
//!
//! Turns the validator's per-keyword failures into the messages shown next
//! to form fields. A failure is identified by two pointers: where in the
//! schema the failing keyword lives (`keyword_location`) and where in the
//! value the failing data lives (`instance_location`).
//!
//! The message is chosen by the keyword, i.e. the last segment of
//! `keyword_location`. Keywords that quote a limit (`minimum`,
//! `minLength`, `format`, ...) take it from, in order:
//!
//! 1. the constraint carried on the [`FailureRecord`] itself,
//! 2. the value at `keyword_location` inside the schema,
//! 3. the literal text of the last segment of `keyword_location`.
//!
//! Invalid user input is never an error here. The only error is a `format`
//! failure naming a format without a friendly display name, which means
//! the schema uses a format the form was never taught to describe.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sform_core::{decode, FormError, FormPath};

use crate::refs::resolve_ref;

/// Friendly names for the `format` values a form can describe.
pub const FORMAT_NAMES: &[(&str, &str)] = &[
    ("date-time", "date and time"),
    ("time", "time"),
    ("date", "date"),
    ("email", "email address"),
];

/// One failed keyword reported by a validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureRecord {
    /// JSON Pointer to the failing keyword inside the schema.
    pub keyword_location: String,
    /// JSON Pointer to the failing value inside the form value.
    pub instance_location: String,
    /// The keyword's constraint value, when the validator reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Value>,
}

impl FailureRecord {
    pub fn new(keyword_location: impl Into<String>, instance_location: impl Into<String>) -> Self {
        Self {
            keyword_location: keyword_location.into(),
            instance_location: instance_location.into(),
            constraint: None,
        }
    }

    pub fn with_constraint(mut self, constraint: Value) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// The failing keyword: last segment of the keyword location.
    pub fn keyword(&self) -> String {
        decode(&self.keyword_location)
            .last()
            .unwrap_or_default()
            .to_owned()
    }
}

/// Field messages keyed by display path.
///
/// When several keywords fail for one field, the first message reported
/// is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message unless the path already has one. Returns whether it
    /// was recorded.
    pub fn insert(&mut self, path: String, message: String) -> bool {
        if self.0.contains_key(&path) {
            return false;
        }
        self.0.insert(path, message);
        true
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Map one failure, given as its two pointers, to `(display path, message)`.
///
/// # Errors
///
/// [`FormError::UnmappedFormat`] for a `format` failure whose format has no
/// entry in [`FORMAT_NAMES`].
pub fn map_error(
    schema: &Value,
    keyword_location: &str,
    instance_location: &str,
) -> Result<(String, String), FormError> {
    map_failure(schema, &FailureRecord::new(keyword_location, instance_location))
}

/// Map one [`FailureRecord`] to `(display path, message)`.
///
/// # Errors
///
/// See [`map_error`].
pub fn map_failure(schema: &Value, failure: &FailureRecord) -> Result<(String, String), FormError> {
    let location = decode(&failure.instance_location).display_path();
    let keyword_path = decode(&failure.keyword_location);
    let keyword = keyword_path.last().unwrap_or_default();
    let constraint = || constraint_text(schema, failure, &keyword_path);

    let message = match keyword {
        "required" => "Please enter a value for this item".to_owned(),
        "minimum" => format!("Please enter a number at least {}", constraint()),
        "maximum" => format!("Please enter a number at most {}", constraint()),
        "minLength" => format!("Please enter text of at least {} characters", constraint()),
        "maxLength" => format!("Please enter text no longer than {} characters", constraint()),
        "pattern" => "Please enter properly formatted value".to_owned(),
        "format" => {
            let format = constraint();
            let friendly = FORMAT_NAMES
                .iter()
                .find(|(name, _)| *name == format)
                .map(|(_, friendly)| *friendly)
                .ok_or(FormError::UnmappedFormat { format: format.clone() })?;
            format!("Please enter a properly formatted {friendly}")
        }
        _ => format!("Fails to satisfy schema at {}", keyword_path.display_path()),
    };
    Ok((location, message))
}

/// Fold a validation pass into a field-message map.
///
/// # Errors
///
/// The first configuration error met, see [`map_error`].
pub fn map_failures<'a, I>(schema: &Value, failures: I) -> Result<ValidationErrors, FormError>
where
    I: IntoIterator<Item = &'a FailureRecord>,
{
    let mut errors = ValidationErrors::new();
    for failure in failures {
        let (path, message) = map_failure(schema, failure)?;
        errors.insert(path, message);
    }
    Ok(errors)
}

fn constraint_text(schema: &Value, failure: &FailureRecord, keyword_path: &FormPath) -> String {
    if let Some(constraint) = &failure.constraint {
        return scalar_text(constraint);
    }
    if let Some(found) = keyword_value(schema, keyword_path) {
        if !found.is_object() && !found.is_array() {
            return scalar_text(found);
        }
    }
    keyword_path.last().unwrap_or_default().to_owned()
}

/// Walk `path` through `schema`, stepping through `$ref` segments the way
/// validators report keyword locations under a reference.
fn keyword_value<'a>(schema: &'a Value, path: &FormPath) -> Option<&'a Value> {
    let mut node = schema;
    for segment in path {
        node = if segment == "$ref" {
            resolve_ref(schema, node.get("$ref")?.as_str()?)?
        } else {
            match node {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            }
        };
    }
    Some(node)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
