//! # cms-core — Foundational Types for the CMS Template Stack
//!
//! Leaf crate of the workspace. Defines the identifier newtypes shared by
//! every other crate and the two JSON helpers the template rules depend on:
//!
//! 1. **Newtype identifiers.** `TemplateId` and `LayoutId` wrap a UUID each,
//!    so a layout reference can never be passed where a template is expected.
//!
//! 2. **Loose-falsy emptiness.** [`json::is_falsy`] decides whether a JSON
//!    value counts as "missing" for required content keys.
//!
//! 3. **Pretty printing.** [`json::to_pretty_string`] renders compiled
//!    definitions with four-space indentation and unescaped slashes.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cms-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod identity;
pub mod json;

pub use identity::{IdentifierError, LayoutId, TemplateId};
pub use json::{is_falsy, to_pretty_string};
