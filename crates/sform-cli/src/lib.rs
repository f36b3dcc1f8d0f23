//! # sform-cli: Command-Line Front End
//!
//! Provides the `sform` binary over the engine crates.
//!
//! ## Subcommands
//!
//! ```bash
//! sform normalize person.schema.json
//! sform check person.schema.json person.yaml
//! sform editor person.schema.json /addresses/0/postcode
//! sform --config engine.yaml -vv check person.schema.json person.json
//! ```
//!
//! Every handler returns an exit code: 0 on success, 1 when the document
//! has failures. Operational errors (unreadable files, invalid schemas)
//! propagate as `anyhow::Error` and exit with 2.

pub mod check;
pub mod editor;
pub mod load;
pub mod normalize;
