//! # cms-cli — CMS Stack Command-Line Interface
//!
//! ## Subcommands
//!
//! - `validate` — check template content files against the content schema
//! - `compile` — compile a template file against a layout file offline
//! - `schema` — print the content JSON Schema
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here take parsed args and
//!   an output writer so they can be tested without a process.
//! - Handlers return an exit code: 0 on success, 1 on a validation failure.
//!   Operational failures (unreadable files, uncompilable layouts) surface
//!   as `anyhow` errors and exit with 2.

pub mod compile;
pub mod schema;
pub mod validate;
