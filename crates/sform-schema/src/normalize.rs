//! # Null-Optionals Normalization
//!
//! A form holds an empty input as `null`. Plain JSON Schema rejects `null`
//! for a `"type": "string"` property even when the property is optional, so
//! before a schema reaches the validator it is rewritten so that every
//! optional field also accepts `null`.
//!
//! ## Rules
//!
//! Walking depth-first from the root:
//!
//! 1. A `$ref` node is replaced by a normalized clone of its target.
//!    Recursive references (a target that reaches its own `$ref` again) and
//!    references outside the document are left in place; the definition
//!    they point at is normalized by rule 5. What happens to the keywords
//!    written next to the `$ref` depends on the draft:
//!    - draft 7 and earlier ignore them when validating, so only
//!      annotations (`title`, `description`, form annotations, definition
//!      containers, ...) are carried onto the clone and the rest is dropped;
//!    - 2019-09 and later apply them together with the target, so the node
//!      becomes the normalized siblings with the target prepended to their
//!      `allOf`.
//! 2. `type: "object"`: every property is visited. Those missing from
//!    `required` are made nullable; required ones keep their type but their
//!    own children are still visited, so optional fields nested under a
//!    required object accept `null` too.
//! 3. `type: "array"`: `items` is made nullable (a freshly added row is
//!    seeded with `null`), and a `{"type": "null"}` branch is appended to an
//!    `items.oneOf` that has none.
//! 4. A nullable node with any other `type` gains `"null"` in its type
//!    union. A node without `type` is left alone.
//! 5. Every entry of `definitions` / `$defs` is made nullable.
//!
//! Object and array nodes themselves are never widened; their empty form is
//! `{}` / `[]`, not `null`.
//!
//! ## Invariants
//!
//! - The input is never modified.
//! - A value the input schema accepts is accepted by the output.
//! - Constraints the validator enforces are never removed; only type
//!   unions and `oneOf` branches grow.
//! - Idempotent: normalizing twice equals normalizing once.

use std::collections::HashMap;

use serde_json::{json, Map, Value};

use crate::config::SchemaDraft;
use crate::refs::{collect_refs, ref_of, resolve_ref};

/// Definition containers visited by rule 5.
const DEFINITION_KEYWORDS: &[&str] = &["definitions", "$defs"];

/// Keywords that never affect validation and so may sit next to a `$ref`
/// under any draft.
const ANNOTATION_KEYWORDS: &[&str] = &[
    "title",
    "description",
    "default",
    "examples",
    "$comment",
    "$schema",
    "readOnly",
    "writeOnly",
    "deprecated",
    "definitions",
    "$defs",
    "controls",
    "editor",
    "hidden",
    "emptyDisplay",
    "enumText",
    "pathPattern",
    "itemPathPattern",
];

/// Return a copy of `schema` in which every optional field accepts `null`.
///
/// The draft is taken from the schema's `$schema`, see
/// [`null_optionals_allowed_for`].
pub fn null_optionals_allowed(schema: &Value) -> Value {
    null_optionals_allowed_for(schema, SchemaDraft::Auto)
}

/// [`null_optionals_allowed`] under an explicit draft. The draft decides
/// what keywords written next to a `$ref` mean.
pub fn null_optionals_allowed_for(schema: &Value, draft: SchemaDraft) -> Value {
    let mut normalized = schema.clone();
    let mut normalizer = Normalizer {
        root: schema,
        ref_siblings_apply: draft.applies_ref_siblings(schema),
        recursive: HashMap::new(),
    };
    normalizer.apply(&mut normalized, true);
    normalized
}

struct Normalizer<'a> {
    /// Unmodified input; every `$ref` resolves against it.
    root: &'a Value,
    /// Keywords next to a `$ref` are validated (2019-09 onwards).
    ref_siblings_apply: bool,
    /// Memoized answers to "does this reference reach itself?".
    recursive: HashMap<String, bool>,
}

impl Normalizer<'_> {
    fn apply(&mut self, node: &mut Value, nullable: bool) {
        if let Some(reference) = ref_of(node).map(str::to_owned) {
            if let Some(target) = self.inlinable_target(&reference) {
                *node = self.inline_ref(node, &reference, target, nullable);
            } else if let Value::Object(map) = node {
                self.apply_definitions(map);
            }
            return;
        }

        let Value::Object(map) = node else {
            return;
        };

        let kind = map.get("type").and_then(Value::as_str).map(str::to_owned);
        match kind.as_deref() {
            Some("object") => self.apply_object(map),
            Some("array") => self.apply_array(map),
            _ if nullable => allow_null_type(map),
            _ => {}
        }
        self.apply_definitions(map);
    }

    fn apply_definitions(&mut self, map: &mut Map<String, Value>) {
        for keyword in DEFINITION_KEYWORDS {
            if let Some(Value::Object(definitions)) = map.get_mut(*keyword) {
                for definition in definitions.values_mut() {
                    self.apply(definition, true);
                }
            }
        }
    }

    fn apply_object(&mut self, map: &mut Map<String, Value>) {
        let required: Vec<String> = map
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        if let Some(Value::Object(properties)) = map.get_mut("properties") {
            for (name, property) in properties.iter_mut() {
                let optional = !required.contains(name);
                self.apply(property, optional);
            }
        }
    }

    fn apply_array(&mut self, map: &mut Map<String, Value>) {
        match map.get_mut("items") {
            Some(Value::Array(tuple)) => {
                for item in tuple.iter_mut() {
                    self.apply(item, true);
                }
            }
            Some(items) => {
                self.apply(items, true);
                if let Some(Value::Array(branches)) = items.get_mut("oneOf") {
                    let has_null = branches
                        .iter()
                        .any(|branch| branch.get("type").and_then(Value::as_str) == Some("null"));
                    if !has_null {
                        branches.push(json!({"type": "null"}));
                    }
                }
            }
            None => {}
        }
    }

    /// Clone of the node `reference` points at, or `None` to leave the
    /// `$ref` as written.
    fn inlinable_target(&mut self, reference: &str) -> Option<Value> {
        let Some(target) = resolve_ref(self.root, reference) else {
            tracing::warn!(reference, "unresolvable $ref left in place during normalization");
            return None;
        };
        if self.is_recursive(reference) {
            tracing::debug!(reference, "recursive $ref left in place during normalization");
            return None;
        }
        Some(target.clone())
    }

    /// Build the node that replaces a `$ref` node from its resolved target.
    fn inline_ref(&mut self, node: &Value, reference: &str, target: Value, nullable: bool) -> Value {
        let mut annotations = Map::new();
        let mut constraints = Map::new();
        if let Value::Object(map) = node {
            for (key, value) in map {
                if key == "$ref" {
                    continue;
                }
                let bucket = if ANNOTATION_KEYWORDS.contains(&key.as_str()) {
                    &mut annotations
                } else {
                    &mut constraints
                };
                bucket.insert(key.clone(), value.clone());
            }
        }

        if !constraints.is_empty() && !self.ref_siblings_apply {
            let ignored: Vec<&str> = constraints.keys().map(String::as_str).collect();
            tracing::debug!(reference, ?ignored, "keywords beside $ref are not validated under this draft");
            constraints.clear();
        }

        let mut target = target;
        let keeps_target_shape = match &mut target {
            Value::Object(target_map) if constraints.is_empty() => {
                merge_annotations(target_map, annotations.clone());
                true
            }
            _ => constraints.is_empty() && annotations.is_empty(),
        };
        self.apply(&mut target, nullable);
        if keeps_target_shape {
            return target;
        }

        // Siblings that validate (or annotations on a boolean target) stay
        // on the node; the target becomes the first `allOf` branch.
        annotations.extend(constraints);
        let mut wrapper = Value::Object(annotations);
        self.apply(&mut wrapper, nullable);
        if let Value::Object(map) = &mut wrapper {
            match map.get_mut("allOf") {
                Some(Value::Array(branches)) => branches.insert(0, target),
                _ => {
                    map.insert("allOf".to_owned(), Value::Array(vec![target]));
                }
            }
        }
        wrapper
    }

    /// Whether following `reference` can lead back to `reference`.
    fn is_recursive(&mut self, reference: &str) -> bool {
        if let Some(&known) = self.recursive.get(reference) {
            return known;
        }
        let mut seen: Vec<&str> = Vec::new();
        let mut pending: Vec<&str> = vec![reference];
        let mut found = false;
        while let Some(current) = pending.pop() {
            let Some(target) = resolve_ref(self.root, current) else {
                continue;
            };
            let mut refs = Vec::new();
            collect_refs(target, &mut refs);
            for next in refs {
                if next == reference {
                    found = true;
                    break;
                }
                if !seen.contains(&next) {
                    seen.push(next);
                    pending.push(next);
                }
            }
            if found {
                break;
            }
        }
        self.recursive.insert(reference.to_owned(), found);
        found
    }
}

/// Carry a `$ref` node's annotations onto its target. The node's own
/// annotations win, except that definition containers are merged.
fn merge_annotations(target: &mut Map<String, Value>, annotations: Map<String, Value>) {
    for (key, value) in annotations {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(extra))
                if DEFINITION_KEYWORDS.contains(&key.as_str()) =>
            {
                for (name, definition) in extra {
                    existing.entry(name).or_insert(definition);
                }
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

/// Rule 4: add `"null"` to the node's type union.
fn allow_null_type(map: &mut Map<String, Value>) {
    match map.get_mut("type") {
        Some(Value::Array(types)) => {
            if !types.iter().any(|t| t == "null") {
                types.push(json!("null"));
            }
        }
        Some(Value::String(single)) if single.as_str() != "null" => {
            let widened = json!([single.as_str(), "null"]);
            map.insert("type".to_owned(), widened);
        }
        _ => {}
    }
}
