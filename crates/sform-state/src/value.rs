//! # Value Addressing
//!
//! Reading and replacing the value at a [`FormPath`]. Replacement is
//! copy-on-write: the input is left untouched and a new root is returned.

use serde_json::{Map, Value};

use sform_core::{FormError, FormPath};

/// The value at `path`, or `None` when some segment is absent.
///
/// Array segments must parse as indices; object segments are keys.
pub fn value_at_path<'a>(value: &'a Value, path: &FormPath) -> Option<&'a Value> {
    let mut node = value;
    for segment in path {
        node = match node {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(node)
}

/// Return a copy of `value` with the node at `path` replaced by `new_value`.
///
/// Missing object keys and `null` intermediates are created as objects. An
/// array index equal to the array's length appends.
///
/// # Errors
///
/// - [`FormError::IndexOutOfBounds`] for an array index past the end.
/// - [`FormError::PathNotFound`] when a segment must descend into a scalar
///   or a non-numeric segment addresses an array.
pub fn with_value_at_path(
    value: &Value,
    path: &FormPath,
    new_value: Value,
) -> Result<Value, FormError> {
    replace(value, path, path.segments(), new_value)
}

fn replace(
    node: &Value,
    path: &FormPath,
    segments: &[String],
    new_value: Value,
) -> Result<Value, FormError> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(new_value);
    };

    match node {
        Value::Array(items) => {
            let index = segment.parse::<usize>().map_err(|_| FormError::PathNotFound {
                path: path.display_path(),
                reason: format!("'{segment}' is not an index into an array"),
            })?;
            if index > items.len() {
                return Err(FormError::IndexOutOfBounds {
                    index,
                    len: items.len(),
                });
            }
            let child = items.get(index).unwrap_or(&Value::Null);
            let replaced = replace(child, path, rest, new_value)?;

            let mut out = Vec::with_capacity(items.len() + 1);
            out.extend_from_slice(&items[..index]);
            out.push(replaced);
            if index < items.len() {
                out.extend_from_slice(&items[index + 1..]);
            }
            Ok(Value::Array(out))
        }
        Value::Object(map) => {
            let child = map.get(segment).unwrap_or(&Value::Null);
            let replaced = replace(child, path, rest, new_value)?;
            let mut out = map.clone();
            out.insert(segment.clone(), replaced);
            Ok(Value::Object(out))
        }
        Value::Null => {
            let replaced = replace(&Value::Null, path, rest, new_value)?;
            let mut out = Map::new();
            out.insert(segment.clone(), replaced);
            Ok(Value::Object(out))
        }
        scalar => Err(FormError::PathNotFound {
            path: path.display_path(),
            reason: format!("cannot descend into {scalar} at '{segment}'"),
        }),
    }
}
