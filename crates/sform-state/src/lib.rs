//! # sform-state: Form Value State
//!
//! Everything that changes while a form is being edited. The schema side
//! (`sform-schema`) is immutable once a form is built; this crate holds the
//! value and rebuilds it on every edit.
//!
//! ## Modules
//!
//! - [`value`]: read and copy-on-write replace the value at a [`FormPath`].
//! - [`array`]: add, delete, duplicate and reorder array items. Each
//!   mutation is reported to a [`PathChanged`] sink with its [`ArrayOp`] tag.
//! - [`session`]: [`FormSession`], the sink that owns the current value,
//!   revalidates it after every change and reports a [`FormEvent`].
//!
//! ## Crate Policy
//!
//! - Values are never mutated in place; every edit yields a new value.
//! - No `.unwrap()` outside tests.
//!
//! [`FormPath`]: sform_core::FormPath

pub mod array;
pub mod session;
pub mod value;

pub use array::{
    apply_array_op, array_add, array_delete, array_down, array_duplicate, array_up, mutate,
    ArrayMutation, ArrayOp, MutationResult, PathChanged,
};
pub use session::{FormEvent, FormSession, SessionError};
pub use value::{value_at_path, with_value_at_path};
