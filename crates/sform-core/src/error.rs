//! # Error Types
//!
//! Configuration errors raised by the form engine. All of them indicate an
//! authoring mistake in the schema or a broken internal invariant; invalid
//! user input is never reported through this type (it flows as data through
//! the error mapper instead).

use thiserror::Error;

/// Top-level error type for the form engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A composite editor identifier has no `format` to resolve to.
    #[error("schema - no format for {editor}")]
    UnmappedEditor {
        /// The composite identifier, e.g. `string-date`.
        editor: String,
    },

    /// A `format` failure named a format with no friendly display name.
    #[error("error mapper - failed to find '{format}' in format names")]
    UnmappedFormat {
        /// The format value reported by the validator.
        format: String,
    },

    /// An array element was addressed that does not exist.
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Length of the array at the time of the access.
        len: usize,
    },

    /// An array operation was applied to a value that is not an array.
    #[error("value at '{path}' is not an array")]
    NotAnArray {
        /// Display path of the offending value.
        path: String,
    },

    /// The schema's annotation fields have the wrong shape.
    #[error("invalid form annotation: {reason}")]
    InvalidAnnotation {
        /// Deserialization failure text.
        reason: String,
    },

    /// An array control was used where the schema does not permit it.
    #[error("control '{control}' is not permitted at '{path}'")]
    ControlNotAllowed {
        /// The control name (`add`, `delete`, `duplicate`, `reorder`).
        control: String,
        /// Display path of the array.
        path: String,
    },

    /// A path could not be followed through the value or schema tree.
    #[error("path '{path}' not present: {reason}")]
    PathNotFound {
        /// Display path that failed to resolve.
        path: String,
        /// Why traversal stopped.
        reason: String,
    },
}
