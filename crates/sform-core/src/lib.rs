//! # sform-core: Foundational Types for the Form Engine
//!
//! Leaf crate of the sform workspace. Every other crate depends on it; it
//! depends on nothing internal.
//!
//! ## Contents
//!
//! - [`path`]: [`FormPath`], the segment form of a location inside a form
//!   value, decoded from the three JSON Pointer styles a validator may emit
//!   and rendered as a dotted/bracketed display path.
//! - [`text`]: substring and case helpers used for labels, messages and
//!   path patterns.
//! - [`ids`]: [`IdSequence`], a per-form counter for minting element ids.
//! - [`error`]: [`FormError`], the configuration-error taxonomy shared by
//!   all crates.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sform-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - No process-wide mutable state.

pub mod error;
pub mod ids;
pub mod path;
pub mod text;

pub use error::FormError;
pub use ids::IdSequence;
pub use path::{decode, is_index_segment, pointer_to_display, FormPath};
