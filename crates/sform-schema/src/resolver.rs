//! # Empty Values & Editor Resolution
//!
//! Per-node decisions the rendering layer asks of the schema: what value a
//! newly revealed field starts with, and which input control renders it.

use serde_json::{json, Value};

use sform_core::{FormError, FormPath};

use crate::refs::deref;

/// Editor identifiers that are spelled as `<type>-<format>` but must render
/// with the control named by the format alone.
pub const COMPOSITE_EDITORS: &[&str] = &[
    "string-date-time",
    "string-date",
    "string-time",
    "string-email",
    "string-password",
    "number-currency",
];

/// The node's declared type, ignoring a `"null"` member of a type union.
///
/// `["string", "null"]` (the shape normalization produces) yields `string`;
/// a union of only `"null"` yields `null`. An untyped node takes the type of
/// its first typed `allOf` branch, which is where normalization puts the
/// target of a `$ref` that had validating siblings.
pub fn base_type(schema: &Value) -> Option<&str> {
    match schema.get("type") {
        Some(Value::String(single)) => Some(single.as_str()),
        Some(Value::Array(types)) => {
            let mut names = types.iter().filter_map(Value::as_str);
            let first = names.clone().next();
            names.find(|t| *t != "null").or(first)
        }
        Some(_) => None,
        None => schema.get("allOf")?.as_array()?.iter().find_map(base_type),
    }
}

/// `keyword` on `node`, or on the first direct `allOf` branch that has it.
fn keyword_of<'a>(root: &'a Value, node: &'a Value, keyword: &str) -> Option<&'a Value> {
    node.get(keyword).or_else(|| {
        node.get("allOf")?
            .as_array()?
            .iter()
            .filter_map(|branch| deref(root, branch))
            .find_map(|branch| branch.get(keyword))
    })
}

/// Default value for a freshly appended row or revealed optional field.
///
/// `{}` for objects, `[]` for arrays, `null` for everything else, including
/// a missing schema.
pub fn empty_value(schema: Option<&Value>) -> Value {
    match schema.and_then(base_type) {
        Some("object") => json!({}),
        Some("array") => json!([]),
        _ => Value::Null,
    }
}

/// Pick the control identifier for a schema node.
///
/// Precedence, lowest to highest: base type, `enum`, `-<format>` suffix,
/// `hidden`, explicit `editor`. A resulting [`COMPOSITE_EDITORS`] entry
/// resolves to the node's `format`.
///
/// # Errors
///
/// [`FormError::UnmappedEditor`] when a composite identifier is selected on
/// a node with no `format` (typically an explicit `editor: "string-date"`).
pub fn editor_for_schema(schema: &Value) -> Result<String, FormError> {
    let format = schema.get("format").and_then(Value::as_str);

    let mut editor = base_type(schema).unwrap_or_default().to_owned();
    if schema.get("enum").is_some() {
        editor = "enum".to_owned();
    }
    if let Some(format) = format {
        editor = if editor.is_empty() {
            format.to_owned()
        } else {
            format!("{editor}-{format}")
        };
    }
    if schema.get("hidden").and_then(Value::as_bool) == Some(true) {
        editor = "hidden".to_owned();
    }
    if let Some(explicit) = schema.get("editor").and_then(Value::as_str) {
        if !explicit.is_empty() {
            editor = explicit.to_owned();
        }
    }

    if COMPOSITE_EDITORS.contains(&editor.as_str()) {
        return format
            .map(str::to_owned)
            .ok_or(FormError::UnmappedEditor { editor });
    }
    Ok(editor)
}

/// Find the schema node that describes the value at `path`.
///
/// Array segments step into `items` (or the matching tuple entry), object
/// segments into `properties`, falling back to an object-valued
/// `additionalProperties`. `$ref`s are followed against `root`.
///
/// # Errors
///
/// [`FormError::PathNotFound`] when a segment has no schema.
pub fn schema_at_path<'a>(root: &'a Value, path: &FormPath) -> Result<&'a Value, FormError> {
    let not_found = |reason: &str| FormError::PathNotFound {
        path: path.display_path(),
        reason: reason.to_owned(),
    };

    let mut node = deref(root, root).ok_or_else(|| not_found("unresolvable $ref at root"))?;
    for segment in path {
        let child = match base_type(node) {
            Some("array") => match keyword_of(root, node, "items") {
                Some(Value::Array(tuple)) => segment.parse::<usize>().ok().and_then(|i| tuple.get(i)),
                other => other,
            },
            _ => keyword_of(root, node, "properties")
                .and_then(|props| props.get(segment.as_str()))
                .or_else(|| {
                    keyword_of(root, node, "additionalProperties").filter(|v| v.is_object())
                }),
        };
        let child = child.ok_or_else(|| not_found(&format!("no schema for segment '{segment}'")))?;
        node = deref(root, child).ok_or_else(|| not_found("unresolvable $ref"))?;
    }
    Ok(node)
}
