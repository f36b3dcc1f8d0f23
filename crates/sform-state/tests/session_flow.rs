//! End-to-end editing of a form: build a session, edit fields, run array
//! operations, and watch the field messages follow the value.

use serde_json::{json, Value};

use sform_core::{FormError, FormPath};
use sform_schema::EngineConfig;
use sform_state::{ArrayMutation, ArrayOp, FormSession, PathChanged, SessionError};

fn invoice_schema() -> Value {
    json!({
        "type": "object",
        "required": ["number", "lines"],
        "definitions": {
            "line": {
                "type": "object",
                "required": ["sku"],
                "properties": {
                    "sku": {"type": "string", "pattern": "^[A-Z][0-9]+$"},
                    "qty": {"type": "integer", "minimum": 1},
                    "note": {"type": "string"}
                }
            }
        },
        "properties": {
            "number": {"type": "string", "minLength": 4},
            "issued": {"type": "string", "format": "date"},
            "lines": {"type": "array", "items": {"$ref": "#/definitions/line"}}
        }
    })
}

fn path(segments: &[&str]) -> FormPath {
    FormPath::from_segments(segments.iter().copied())
}

#[test]
fn editing_an_invoice() {
    let mut session = FormSession::new(
        &invoice_schema(),
        &EngineConfig::default(),
        json!({"number": "INV-1", "lines": []}),
    )
    .unwrap();
    assert!(session.errors().is_empty());

    let added = session
        .apply_array_op(&path(&["lines"]), ArrayMutation::Add)
        .unwrap()
        .unwrap();
    assert_eq!(added.op, Some(ArrayOp::Add));
    assert_eq!(added.path_value, json!([{}]));
    assert_eq!(
        added.errors.get("lines[0]"),
        Some("Please enter a value for this item")
    );

    let event = session
        .update(&path(&["lines", "0", "sku"]), json!("a1"), None)
        .unwrap();
    assert_eq!(
        event.errors.get("lines[0].sku"),
        Some("Please enter properly formatted value")
    );

    session
        .update(&path(&["lines", "0", "sku"]), json!("A1"), None)
        .unwrap();
    let event = session
        .update(&path(&["lines", "0", "qty"]), json!(0), None)
        .unwrap();
    assert_eq!(
        event.errors.get("lines[0].qty"),
        Some("Please enter a number at least 1")
    );

    let event = session
        .update(&path(&["lines", "0", "qty"]), Value::Null, None)
        .unwrap();
    assert!(event.errors.is_empty(), "optional qty accepts null: {:?}", event.errors);

    let duplicated = session
        .apply_array_op(&path(&["lines"]), ArrayMutation::Duplicate(0))
        .unwrap()
        .unwrap();
    assert_eq!(duplicated.op, Some(ArrayOp::Duplicate));
    assert_eq!(duplicated.value["lines"][0], duplicated.value["lines"][1]);

    let deleted = session
        .apply_array_op(&path(&["lines"]), ArrayMutation::Delete(1))
        .unwrap()
        .unwrap();
    assert_eq!(
        deleted.value,
        json!({"number": "INV-1", "lines": [{"sku": "A1", "qty": null}]})
    );
}

#[test]
fn format_failures_use_friendly_names() {
    let mut session = FormSession::new(
        &invoice_schema(),
        &EngineConfig::default(),
        json!({"number": "INV-1", "lines": []}),
    )
    .unwrap();
    let event = session
        .update(&path(&["issued"]), json!("yesterday"), None)
        .unwrap();
    assert_eq!(
        event.errors.get("issued"),
        Some("Please enter a properly formatted date")
    );
}

#[test]
fn reorder_at_boundary_is_a_no_op() {
    let mut session = FormSession::new(
        &invoice_schema(),
        &EngineConfig::default(),
        json!({"number": "INV-1", "lines": [{"sku": "A1"}, {"sku": "B2"}]}),
    )
    .unwrap();
    let before = session.value().clone();
    assert!(session
        .apply_array_op(&path(&["lines"]), ArrayMutation::Down(1))
        .unwrap()
        .is_none());
    assert_eq!(session.value(), &before);

    let moved = session
        .apply_array_op(&path(&["lines"]), ArrayMutation::Up(1))
        .unwrap()
        .unwrap();
    assert_eq!(moved.value["lines"], json!([{"sku": "B2"}, {"sku": "A1"}]));
}

#[test]
fn out_of_range_delete_is_an_error() {
    let mut session = FormSession::new(
        &invoice_schema(),
        &EngineConfig::default(),
        json!({"number": "INV-1", "lines": []}),
    )
    .unwrap();
    let err = session
        .apply_array_op(&path(&["lines"]), ArrayMutation::Delete(0))
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Form(FormError::IndexOutOfBounds { index: 0, len: 0 })
    ));
}

#[test]
fn session_is_a_path_changed_sink() {
    let mut session = FormSession::new(
        &invoice_schema(),
        &EngineConfig::default(),
        json!({"number": "INV-1", "lines": []}),
    )
    .unwrap();
    let event = session
        .path_changed(&path(&["number"]), json!("X"), None)
        .unwrap();
    assert_eq!(
        event.errors.get("number"),
        Some("Please enter text of at least 4 characters")
    );
}
