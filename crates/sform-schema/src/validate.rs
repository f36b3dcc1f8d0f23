//! # Schema Validation
//!
//! The validator collaborator for a form. A [`SchemaValidator`] normalizes
//! the form schema once, compiles it with the `jsonschema` crate, and then
//! reports each failed keyword of a value as a [`FailureRecord`] for the
//! mapper to turn into field messages.
//!
//! Any other validator that can report keyword and instance locations is
//! interchangeable with this one; the mapper only sees records.

use jsonschema::error::ValidationErrorKind;
use serde_json::{json, Value};
use thiserror::Error;

use sform_core::FormError;

use crate::config::EngineConfig;
use crate::mapper::{map_failures, FailureRecord, ValidationErrors};
use crate::normalize::null_optionals_allowed_for;

/// Error while preparing or applying a form validator.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The compiled validator could not be built (invalid schema).
    #[error("validator build error: {reason}")]
    ValidatorBuildError {
        /// Reason reported by the compiler.
        reason: String,
    },

    /// A failure could not be mapped to a field message.
    #[error("failure mapping error: {0}")]
    Mapping(#[from] FormError),
}

/// A compiled validator for one form schema.
pub struct SchemaValidator {
    /// The schema actually compiled (normalized unless disabled).
    schema: Value,
    validator: jsonschema::Validator,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Prepare a validator for `schema` under `config`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidatorBuildError` if `jsonschema`
    /// rejects the (normalized) schema.
    pub fn new(schema: &Value, config: &EngineConfig) -> Result<Self, SchemaValidationError> {
        let schema = if config.normalize {
            null_optionals_allowed_for(schema, config.draft)
        } else {
            schema.clone()
        };
        let draft = config.draft.to_jsonschema(&schema);

        let validator = jsonschema::options()
            .with_draft(draft)
            .should_validate_formats(config.validate_formats)
            .build(&schema)
            .map_err(|e| SchemaValidationError::ValidatorBuildError {
                reason: e.to_string(),
            })?;

        tracing::debug!(
            ?draft,
            normalized = config.normalize,
            validate_formats = config.validate_formats,
            "compiled form schema"
        );

        Ok(Self { schema, validator })
    }

    /// The schema the validator was compiled from.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        self.validator.is_valid(value)
    }

    /// Every failed keyword for `value`, in validator order.
    pub fn failures(&self, value: &Value) -> Vec<FailureRecord> {
        self.validator
            .iter_errors(value)
            .map(|e| {
                let record = FailureRecord::new(e.schema_path.to_string(), e.instance_path.to_string());
                match constraint_of(&e.kind) {
                    Some(constraint) => record.with_constraint(constraint),
                    None => record,
                }
            })
            .collect()
    }

    /// Validate `value` and map the failures to field messages.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::Mapping` for a configuration error in
    /// the schema (e.g. an undescribed `format`). Invalid values are not
    /// errors; they produce a non-empty map.
    pub fn validation_errors(&self, value: &Value) -> Result<ValidationErrors, SchemaValidationError> {
        let failures = self.failures(value);
        let errors = map_failures(&self.schema, &failures)?;
        tracing::debug!(failures = failures.len(), fields = errors.len(), "validated form value");
        Ok(errors)
    }
}

/// The limit a failed keyword quoted, for the keywords whose message shows it.
fn constraint_of(kind: &ValidationErrorKind) -> Option<Value> {
    match kind {
        ValidationErrorKind::Minimum { limit } | ValidationErrorKind::Maximum { limit } => {
            Some(limit.clone())
        }
        ValidationErrorKind::MinLength { limit } | ValidationErrorKind::MaxLength { limit } => {
            Some(json!(limit))
        }
        ValidationErrorKind::Format { format } => Some(json!(format)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contact_schema() -> Value {
        json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {"type": "string", "minLength": 3},
                "email": {"type": "string", "format": "email"},
                "age": {"type": "integer", "minimum": 18}
            }
        })
    }

    #[test]
    fn test_valid_value_has_no_failures() {
        let validator = SchemaValidator::new(&contact_schema(), &EngineConfig::default()).unwrap();
        let value = json!({"name": "Ada", "email": "ada@example.org", "age": 36});
        assert!(validator.is_valid(&value));
        assert!(validator.failures(&value).is_empty());
    }

    #[test]
    fn test_null_optionals_accepted_after_normalization() {
        let validator = SchemaValidator::new(&contact_schema(), &EngineConfig::default()).unwrap();
        let value = json!({"name": "Ada", "email": null, "age": null});
        assert!(validator.is_valid(&value));
    }

    #[test]
    fn test_null_optionals_rejected_without_normalization() {
        let config = EngineConfig {
            normalize: false,
            ..EngineConfig::default()
        };
        let validator = SchemaValidator::new(&contact_schema(), &config).unwrap();
        let value = json!({"name": "Ada", "email": null});
        assert!(!validator.is_valid(&value));
    }

    #[test]
    fn test_failures_map_to_field_messages() {
        let validator = SchemaValidator::new(&contact_schema(), &EngineConfig::default()).unwrap();
        let value = json!({"name": "Al", "age": 12});
        let errors = validator.validation_errors(&value).unwrap();
        assert_eq!(
            errors.get("name"),
            Some("Please enter text of at least 3 characters")
        );
        assert_eq!(errors.get("age"), Some("Please enter a number at least 18"));
    }

    #[test]
    fn test_failures_carry_constraint() {
        let validator = SchemaValidator::new(&contact_schema(), &EngineConfig::default()).unwrap();
        let failures = validator.failures(&json!({"name": "Al"}));
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].keyword_location, "/properties/name/minLength");
        assert_eq!(failures[0].instance_location, "/name");
        assert_eq!(failures[0].constraint, Some(json!(3)));
    }

    #[test]
    fn test_missing_required_reported_on_parent() {
        let validator = SchemaValidator::new(&contact_schema(), &EngineConfig::default()).unwrap();
        let errors = validator.validation_errors(&json!({})).unwrap();
        assert_eq!(errors.get(""), Some("Please enter a value for this item"));
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let err = SchemaValidator::new(&json!({"type": 12}), &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, SchemaValidationError::ValidatorBuildError { .. }));
    }
}
