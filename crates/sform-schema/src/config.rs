//! # Engine Configuration
//!
//! Settings that shape how a form schema is prepared for validation. Read
//! from YAML or JSON; every field is optional.
//!
//! ```yaml
//! draft: draft7          # auto | draft4 | draft6 | draft7 | draft2019-09 | draft2020-12
//! normalize: true        # apply null-optionals normalization before compiling
//! validate-formats: true # treat `format` as an assertion
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error while parsing an engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON Schema draft used to compile form schemas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaDraft {
    /// Pick from the schema's `$schema` keyword, defaulting to draft 7.
    #[default]
    Auto,
    Draft4,
    Draft6,
    Draft7,
    #[serde(rename = "draft2019-09")]
    Draft201909,
    #[serde(rename = "draft2020-12")]
    Draft202012,
}

impl SchemaDraft {
    /// Settle `Auto` against a concrete schema document.
    pub fn resolve(self, schema: &Value) -> SchemaDraft {
        if self != SchemaDraft::Auto {
            return self;
        }
        let declared = schema.get("$schema").and_then(Value::as_str).unwrap_or_default();
        if declared.contains("draft-04") {
            SchemaDraft::Draft4
        } else if declared.contains("draft-06") {
            SchemaDraft::Draft6
        } else if declared.contains("2019-09") {
            SchemaDraft::Draft201909
        } else if declared.contains("2020-12") {
            SchemaDraft::Draft202012
        } else {
            SchemaDraft::Draft7
        }
    }

    /// Whether keywords next to a `$ref` are applied alongside it (2019-09
    /// onwards) rather than ignored (draft 7 and earlier).
    pub fn applies_ref_siblings(self, schema: &Value) -> bool {
        matches!(
            self.resolve(schema),
            SchemaDraft::Draft201909 | SchemaDraft::Draft202012
        )
    }

    pub(crate) fn to_jsonschema(self, schema: &Value) -> jsonschema::Draft {
        match self.resolve(schema) {
            SchemaDraft::Draft4 => jsonschema::Draft::Draft4,
            SchemaDraft::Draft6 => jsonschema::Draft::Draft6,
            SchemaDraft::Draft201909 => jsonschema::Draft::Draft201909,
            SchemaDraft::Draft202012 => jsonschema::Draft::Draft202012,
            SchemaDraft::Draft7 | SchemaDraft::Auto => jsonschema::Draft::Draft7,
        }
    }
}

/// Settings for preparing and validating a form schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EngineConfig {
    pub draft: SchemaDraft,
    pub normalize: bool,
    pub validate_formats: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            draft: SchemaDraft::Auto,
            normalize: true,
            validate_formats: true,
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.draft, SchemaDraft::Auto);
        assert!(config.normalize);
        assert!(config.validate_formats);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EngineConfig::from_yaml_str("draft: draft2020-12\n").unwrap();
        assert_eq!(config.draft, SchemaDraft::Draft202012);
        assert!(config.normalize);
    }

    #[test]
    fn test_full_json() {
        let config = EngineConfig::from_json_str(
            r#"{"draft": "draft4", "normalize": false, "validate-formats": false}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            EngineConfig {
                draft: SchemaDraft::Draft4,
                normalize: false,
                validate_formats: false,
            }
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = EngineConfig::from_yaml_str("normalise: true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_auto_draft_detection() {
        let draft4 = json!({"$schema": "http://json-schema.org/draft-04/schema#"});
        assert_eq!(SchemaDraft::Auto.resolve(&draft4), SchemaDraft::Draft4);
        let modern = json!({"$schema": "https://json-schema.org/draft/2020-12/schema"});
        assert_eq!(SchemaDraft::Auto.resolve(&modern), SchemaDraft::Draft202012);
        assert_eq!(SchemaDraft::Auto.resolve(&json!({})), SchemaDraft::Draft7);
        assert_eq!(SchemaDraft::Draft6.resolve(&draft4), SchemaDraft::Draft6);
    }

    #[test]
    fn test_ref_sibling_semantics_by_draft() {
        let modern = json!({"$schema": "https://json-schema.org/draft/2019-09/schema"});
        assert!(SchemaDraft::Auto.applies_ref_siblings(&modern));
        assert!(!SchemaDraft::Auto.applies_ref_siblings(&json!({})));
        assert!(!SchemaDraft::Draft7.applies_ref_siblings(&modern));
        assert!(SchemaDraft::Draft202012.applies_ref_siblings(&json!({})));
    }
}
