//! # Local `$ref` Resolution
//!
//! Form schemas keep shared shapes under `definitions` / `$defs` and point
//! at them with `$ref`. Only references into the same document are
//! followed: `#`, `#/<pointer>`, and `<uri>#/<pointer>` where `<uri>` is the
//! root's own `$id`. Anything else is reported as unresolvable and left for
//! the validator to deal with.

use serde_json::Value;

/// Upper bound on chained `$ref` hops before giving up.
const MAX_REF_HOPS: usize = 32;

/// Look up the node a `$ref` string points at within `root`.
pub fn resolve_ref<'a>(root: &'a Value, reference: &str) -> Option<&'a Value> {
    let (base, fragment) = match reference.split_once('#') {
        Some((base, fragment)) => (base, fragment),
        None => (reference, ""),
    };
    if !base.is_empty() {
        let own_id = root.get("$id").or_else(|| root.get("id")).and_then(Value::as_str);
        let own_base = own_id.map(|id| id.split_once('#').map_or(id, |(b, _)| b));
        if own_base != Some(base) {
            return None;
        }
    }
    if fragment.is_empty() {
        return Some(root);
    }
    root.pointer(fragment)
}

/// The `$ref` string of a node, if it has one.
pub fn ref_of(node: &Value) -> Option<&str> {
    node.get("$ref").and_then(Value::as_str)
}

/// Follow a chain of `$ref`s from `node` until a concrete node is reached.
///
/// Returns `None` if a link is unresolvable or the chain does not end.
pub fn deref<'a>(root: &'a Value, node: &'a Value) -> Option<&'a Value> {
    let mut current = node;
    for _ in 0..MAX_REF_HOPS {
        match ref_of(current) {
            Some(reference) => current = resolve_ref(root, reference)?,
            None => return Some(current),
        }
    }
    None
}

/// Collect every `$ref` string anywhere inside `node`.
pub fn collect_refs<'a>(node: &'a Value, out: &mut Vec<&'a str>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "$ref" {
                    if let Some(reference) = child.as_str() {
                        out.push(reference);
                    }
                } else {
                    collect_refs(child, out);
                }
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_refs(child, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root() -> Value {
        json!({
            "$id": "https://schemas.example.org/person.json",
            "definitions": {
                "name": {"type": "string", "minLength": 1},
                "alias": {"$ref": "#/definitions/name"},
                "loop": {"$ref": "#/definitions/loop"}
            },
            "$defs": {"age": {"type": "integer"}}
        })
    }

    #[test]
    fn test_resolve_document_anchored() {
        let root = root();
        let found = resolve_ref(&root, "#/definitions/name").unwrap();
        assert_eq!(found["minLength"], 1);
        assert_eq!(resolve_ref(&root, "#/$defs/age").unwrap()["type"], "integer");
    }

    #[test]
    fn test_resolve_root_and_own_id() {
        let root = root();
        assert_eq!(resolve_ref(&root, "#"), Some(&root));
        let found = resolve_ref(&root, "https://schemas.example.org/person.json#/definitions/name");
        assert!(found.is_some());
    }

    #[test]
    fn test_foreign_document_unresolvable() {
        let root = root();
        assert!(resolve_ref(&root, "https://elsewhere.org/x.json#/definitions/name").is_none());
        assert!(resolve_ref(&root, "#/definitions/missing").is_none());
    }

    #[test]
    fn test_deref_follows_chain_and_stops_on_loop() {
        let root = root();
        let alias = &root["definitions"]["alias"];
        assert_eq!(deref(&root, alias).unwrap()["type"], "string");
        let looped = &root["definitions"]["loop"];
        assert!(deref(&root, looped).is_none());
    }

    #[test]
    fn test_collect_refs() {
        let root = root();
        let mut refs = Vec::new();
        collect_refs(&root, &mut refs);
        assert_eq!(refs.len(), 2);
        assert!(refs.contains(&"#/definitions/name"));
    }
}
