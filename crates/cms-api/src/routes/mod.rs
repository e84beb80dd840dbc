//! # API Route Modules
//!
//! - `compile` — template compilation against the template's layout.
//! - `templates` — template records, content replacement, content schema.
//! - `layouts` — layout records.

pub mod compile;
pub mod layouts;
pub mod templates;
