//! # Schema Subcommand
//!
//! Prints the template content JSON Schema.

use std::io::Write;

use anyhow::Result;

use cms_core::to_pretty_string;

/// Execute `cms schema`.
pub fn run_schema(out: &mut dyn Write) -> Result<u8> {
    writeln!(out, "{}", to_pretty_string(&cms_schema::json_schema())?)?;
    Ok(0)
}
