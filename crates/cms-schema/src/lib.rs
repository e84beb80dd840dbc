//! # cms-schema — Template Content Schema
//!
//! Validates the JSON body of a template before it is stored.
//!
//! ## Responsibilities
//!
//! - **Runtime validation:** [`ContentSchema::validate`] checks a raw JSON
//!   string against a fixed whitelist of six top-level keys and the
//!   required-key policy, returning the parsed object and the derived
//!   template name.
//!
//! - **Schema document:** [`json_schema`] renders the same rules as a JSON
//!   Schema (Draft 2020-12) for API clients.
//!
//! Validation errors are structured via [`ContentError`], each variant
//! carrying a human-readable reason and a machine code.

pub mod content;
pub mod document;

pub use content::{
    validate, ContentError, ContentSchema, KeyRule, ValidatedContent, CONTENT_KEYS, NAME_KEY,
};
pub use document::{json_schema, CONTENT_SCHEMA_ID};
