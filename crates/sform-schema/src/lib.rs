//! # sform-schema: Schema Reshaping & Failure Mapping
//!
//! Everything the form engine does with a schema document. Nothing here
//! validates a schema; the crate reshapes schemas before they reach the
//! validator and reinterprets what the validator reports.
//!
//! ## Modules
//!
//! - [`normalize`]: [`null_optionals_allowed`], widening every optional
//!   field so an empty input can be held as `null`.
//! - [`resolver`]: [`empty_value`], [`editor_for_schema`] and
//!   [`schema_at_path`].
//! - [`mapper`]: [`map_error`], turning one validator failure into a
//!   display path and a user-facing message.
//! - [`annotations`]: typed view over the form-only extension fields.
//! - [`refs`]: local `$ref` lookup against the root document.
//! - [`validate`]: [`SchemaValidator`], the `jsonschema` collaborator that
//!   produces [`FailureRecord`]s.
//! - [`config`]: [`EngineConfig`].
//!
//! ## Crate Policy
//!
//! - Depends only on `sform-core` internally.
//! - Schemas are never mutated in place; every transform returns a new value.
//! - Authoring mistakes surface as [`sform_core::FormError`]; invalid user
//!   input is data, never an error.

pub mod annotations;
pub mod config;
pub mod mapper;
pub mod normalize;
pub mod refs;
pub mod resolver;
pub mod validate;

pub use annotations::{enum_options, schema_label, Control, EmptyDisplay, FormAnnotations};
pub use config::{ConfigError, EngineConfig, SchemaDraft};
pub use mapper::{map_error, map_failure, map_failures, FailureRecord, ValidationErrors};
pub use normalize::{null_optionals_allowed, null_optionals_allowed_for};
pub use resolver::{editor_for_schema, empty_value, schema_at_path};
pub use validate::{SchemaValidationError, SchemaValidator};
