//! # File Loading
//!
//! Schemas, documents and engine configs are read from disk as JSON or
//! YAML, chosen by file extension (`.yaml` / `.yml` is YAML, anything else
//! JSON).

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use sform_schema::EngineConfig;

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Read a JSON or YAML file into a JSON value.
pub fn load_document(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if is_yaml(path) {
        let yaml: serde_yaml::Value = serde_yaml::from_str(&text)
            .with_context(|| format!("invalid YAML in {}", path.display()))?;
        yaml_to_json(&yaml).with_context(|| format!("cannot represent {} as JSON", path.display()))
    } else {
        serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
    }
}

/// Read the engine configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = if is_yaml(path) {
        EngineConfig::from_yaml_str(&text)
    } else {
        EngineConfig::from_json_str(&text)
    };
    config.with_context(|| format!("invalid config {}", path.display()))
}

/// Convert a YAML tree to JSON. Map keys must be scalars; tags are dropped.
pub fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value> {
    Ok(match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                match n.as_f64().and_then(serde_json::Number::from_f64) {
                    Some(f) => Value::Number(f),
                    None => bail!("number {n} has no JSON representation"),
                }
            }
        }
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.iter().map(yaml_to_json).collect::<Result<_>>()?)
        }
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (key, value) in map {
                let key = match key {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => bail!("unsupported map key {other:?}"),
                };
                object.insert(key, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(&tagged.value)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sform_schema::SchemaDraft;

    #[test]
    fn test_yaml_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.yaml");
        std::fs::write(&path, "name: Ada\nage: 36\ntags: [a, b]\nratio: 0.5\n1: one\n").unwrap();
        let value = load_document(&path).unwrap();
        assert_eq!(
            value,
            json!({"name": "Ada", "age": 36, "tags": ["a", "b"], "ratio": 0.5, "1": "one"})
        );
    }

    #[test]
    fn test_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{"a": [1, null]}"#).unwrap();
        assert_eq!(load_document(&path).unwrap(), json!({"a": [1, null]}));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_document(Path::new("/nonexistent/sform/doc.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/sform/doc.json"));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{").unwrap();
        assert!(load_document(&path).is_err());
    }

    #[test]
    fn test_config_defaults_and_files() {
        assert_eq!(load_config(None).unwrap(), EngineConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("engine.yml");
        std::fs::write(&yaml, "draft: draft4\nvalidate-formats: false\n").unwrap();
        let config = load_config(Some(&yaml)).unwrap();
        assert_eq!(config.draft, SchemaDraft::Draft4);
        assert!(!config.validate_formats);

        let json = dir.path().join("engine.json");
        std::fs::write(&json, r#"{"normalize": false}"#).unwrap();
        assert!(!load_config(Some(&json)).unwrap().normalize);
    }

    #[test]
    fn test_bad_config_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.yaml");
        std::fs::write(&path, "drafts: draft4\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}
