//! # Array Mutations
//!
//! The five operations an array editor offers. Each builds a new item list
//! from the current one and reports it to a [`PathChanged`] sink together
//! with an [`ArrayOp`] tag naming what happened, so a host can react to
//! (say) a reorder differently from a plain value change.
//!
//! ## Behavior
//!
//! | op          | result                                        | out of range       |
//! |-------------|-----------------------------------------------|--------------------|
//! | `add`       | appends the empty value of the item schema    | n/a                |
//! | `delete`    | removes item `i`                              | `IndexOutOfBounds` |
//! | `duplicate` | inserts a deep copy of item `i` after it      | `IndexOutOfBounds` |
//! | `up`        | swaps items `i - 1` and `i`                   | no-op, no report   |
//! | `down`      | swaps items `i` and `i + 1`                   | no-op, no report   |
//!
//! Items not involved in an operation keep their relative order. A `null`
//! array value is treated as empty.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sform_core::{FormError, FormPath};
use sform_schema::{empty_value, Control};

/// Tag reported with an array mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayOp {
    Add,
    Delete,
    Duplicate,
    Up,
    Down,
}

impl ArrayOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayOp::Add => "add",
            ArrayOp::Delete => "delete",
            ArrayOp::Duplicate => "duplicate",
            ArrayOp::Up => "up",
            ArrayOp::Down => "down",
        }
    }

    /// The schema control that must be enabled for this op.
    pub fn control(&self) -> Control {
        match self {
            ArrayOp::Add => Control::Add,
            ArrayOp::Delete => Control::Delete,
            ArrayOp::Duplicate => Control::Duplicate,
            ArrayOp::Up | ArrayOp::Down => Control::Reorder,
        }
    }
}

impl fmt::Display for ArrayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested array mutation with its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayMutation {
    Add,
    Delete(usize),
    Duplicate(usize),
    Up(usize),
    Down(usize),
}

impl ArrayMutation {
    pub fn op(&self) -> ArrayOp {
        match self {
            ArrayMutation::Add => ArrayOp::Add,
            ArrayMutation::Delete(_) => ArrayOp::Delete,
            ArrayMutation::Duplicate(_) => ArrayOp::Duplicate,
            ArrayMutation::Up(_) => ArrayOp::Up,
            ArrayMutation::Down(_) => ArrayOp::Down,
        }
    }
}

/// New item list produced by a mutation, with its tag.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    pub items: Vec<Value>,
    pub op: ArrayOp,
}

/// Receiver of value changes.
///
/// Called with the path that changed, the new value at that path, and the
/// array op when the change came from one. Any `FnMut` with the matching
/// signature is a sink.
pub trait PathChanged {
    type Output;

    fn path_changed(&mut self, path: &FormPath, value: Value, op: Option<ArrayOp>) -> Self::Output;
}

impl<F, R> PathChanged for F
where
    F: FnMut(&FormPath, Value, Option<ArrayOp>) -> R,
{
    type Output = R;

    fn path_changed(&mut self, path: &FormPath, value: Value, op: Option<ArrayOp>) -> R {
        self(path, value, op)
    }
}

pub fn array_add(items: &[Value], item_schema: Option<&Value>) -> Vec<Value> {
    let mut out = items.to_vec();
    out.push(empty_value(item_schema));
    out
}

pub fn array_delete(items: &[Value], index: usize) -> Result<Vec<Value>, FormError> {
    check_index(items, index)?;
    let mut out = items.to_vec();
    out.remove(index);
    Ok(out)
}

pub fn array_duplicate(items: &[Value], index: usize) -> Result<Vec<Value>, FormError> {
    check_index(items, index)?;
    let mut out = items.to_vec();
    out.insert(index + 1, items[index].clone());
    Ok(out)
}

/// Move item `index` one place towards the front. `None` at the front or
/// past the end.
pub fn array_up(items: &[Value], index: usize) -> Option<Vec<Value>> {
    if index == 0 || index >= items.len() {
        return None;
    }
    let mut out = items.to_vec();
    out.swap(index - 1, index);
    Some(out)
}

/// Move item `index` one place towards the back. `None` for the last item
/// or past the end.
pub fn array_down(items: &[Value], index: usize) -> Option<Vec<Value>> {
    if index >= items.len().saturating_sub(1) {
        return None;
    }
    let mut out = items.to_vec();
    out.swap(index, index + 1);
    Some(out)
}

/// Run `mutation` over `items`. `Ok(None)` means a boundary no-op.
///
/// # Errors
///
/// [`FormError::IndexOutOfBounds`] for `Delete` / `Duplicate` past the end.
pub fn mutate(
    items: &[Value],
    mutation: ArrayMutation,
    item_schema: Option<&Value>,
) -> Result<Option<MutationResult>, FormError> {
    let items = match mutation {
        ArrayMutation::Add => Some(array_add(items, item_schema)),
        ArrayMutation::Delete(i) => Some(array_delete(items, i)?),
        ArrayMutation::Duplicate(i) => Some(array_duplicate(items, i)?),
        ArrayMutation::Up(i) => array_up(items, i),
        ArrayMutation::Down(i) => array_down(items, i),
    };
    Ok(items.map(|items| MutationResult {
        items,
        op: mutation.op(),
    }))
}

/// Apply `mutation` to the array `current` found at `path` and report the
/// new array to `sink`. Returns the sink's result, or `None` when the
/// mutation was a boundary no-op and the sink was not called.
///
/// # Errors
///
/// - [`FormError::NotAnArray`] if `current` is neither an array nor `null`.
/// - [`FormError::IndexOutOfBounds`], see [`mutate`].
pub fn apply_array_op<S>(
    sink: &mut S,
    path: &FormPath,
    current: &Value,
    mutation: ArrayMutation,
    item_schema: Option<&Value>,
) -> Result<Option<S::Output>, FormError>
where
    S: PathChanged + ?Sized,
{
    let items: &[Value] = match current {
        Value::Array(items) => items,
        Value::Null => &[],
        _ => {
            return Err(FormError::NotAnArray {
                path: path.display_path(),
            })
        }
    };

    let Some(result) = mutate(items, mutation, item_schema)? else {
        tracing::debug!(path = %path, op = %mutation.op(), "array op at boundary ignored");
        return Ok(None);
    };
    tracing::debug!(path = %path, op = %result.op, len = result.items.len(), "array op applied");
    Ok(Some(sink.path_changed(
        path,
        Value::Array(result.items),
        Some(result.op),
    )))
}

fn check_index(items: &[Value], index: usize) -> Result<(), FormError> {
    if index >= items.len() {
        return Err(FormError::IndexOutOfBounds {
            index,
            len: items.len(),
        });
    }
    Ok(())
}
