//! # Form Annotations
//!
//! Extension keywords a form schema may carry next to standard JSON Schema.
//! They steer rendering and editing only; a validator ignores them.
//!
//! | keyword           | meaning                                                     |
//! |-------------------|-------------------------------------------------------------|
//! | `controls`        | array controls offered: `delete`, `duplicate`, `reorder`, `add` |
//! | `editor`          | explicit control identifier                                 |
//! | `hidden`          | render as a hidden input                                    |
//! | `readOnly`        | display only; applies to all children, disables controls    |
//! | `emptyDisplay`    | how an empty array shows: `false`, `true`, or a message     |
//! | `enumText`        | labels parallel to `enum`                                   |
//! | `pathPattern`     | `${path}` pattern naming the value's storage path           |
//! | `itemPathPattern` | the same, per array item                                    |

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sform_core::text::camel_to_title;
use sform_core::{FormError, FormPath};

/// An array control a schema may enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Delete,
    Duplicate,
    Reorder,
    Add,
}

impl Control {
    /// All controls, the default when `controls` is absent.
    pub const ALL: [Control; 4] = [
        Control::Delete,
        Control::Duplicate,
        Control::Reorder,
        Control::Add,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Control::Delete => "delete",
            Control::Duplicate => "duplicate",
            Control::Reorder => "reorder",
            Control::Add => "add",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `emptyDisplay`: hide an empty array, show its frame, or show a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmptyDisplay {
    Shown(bool),
    Message(String),
}

/// Typed view over a schema node's form annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnnotations {
    pub controls: Option<Vec<Control>>,
    pub editor: Option<String>,
    pub hidden: Option<bool>,
    pub read_only: Option<bool>,
    pub empty_display: Option<EmptyDisplay>,
    pub enum_text: Option<Vec<String>>,
    pub path_pattern: Option<String>,
    pub item_path_pattern: Option<String>,
}

impl FormAnnotations {
    /// Read the annotations of one schema node. Non-object schemas (`true`,
    /// `false`) carry none.
    ///
    /// # Errors
    ///
    /// [`FormError::InvalidAnnotation`] if a keyword has the wrong shape,
    /// e.g. `controls: ["sort"]`.
    pub fn from_schema(schema: &Value) -> Result<Self, FormError> {
        let Value::Object(map) = schema else {
            return Ok(Self::default());
        };
        let mut subset = serde_json::Map::new();
        for key in [
            "controls",
            "editor",
            "hidden",
            "readOnly",
            "emptyDisplay",
            "enumText",
            "pathPattern",
            "itemPathPattern",
        ] {
            if let Some(value) = map.get(key) {
                subset.insert(key.to_owned(), value.clone());
            }
        }
        serde_json::from_value(Value::Object(subset)).map_err(|e| FormError::InvalidAnnotation {
            reason: e.to_string(),
        })
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only.unwrap_or(false)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    /// Controls the rendering layer should offer. A read-only array has none.
    pub fn allowed_controls(&self) -> Vec<Control> {
        if self.is_read_only() {
            return Vec::new();
        }
        match &self.controls {
            Some(controls) => controls.clone(),
            None => Control::ALL.to_vec(),
        }
    }

    pub fn allows(&self, control: Control) -> bool {
        self.allowed_controls().contains(&control)
    }
}

/// Field label: the schema's `title`, else the last path segment title-cased.
pub fn schema_label(schema: &Value, path: &FormPath) -> String {
    match schema.get("title").and_then(Value::as_str) {
        Some(title) => title.to_owned(),
        None => camel_to_title(path.last().unwrap_or_default()),
    }
}

/// Pair each `enum` value with its display label.
///
/// Labels come from `enumText` by position; values without one are shown
/// as their own text.
pub fn enum_options(schema: &Value) -> Vec<(Value, String)> {
    let Some(values) = schema.get("enum").and_then(Value::as_array) else {
        return Vec::new();
    };
    let labels = schema.get("enumText").and_then(Value::as_array);
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let label = labels
                .and_then(|labels| labels.get(i))
                .and_then(Value::as_str)
                .map(str::to_owned)
                .unwrap_or_else(|| match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                });
            (value.clone(), label)
        })
        .collect()
}
