//! # JSON Helpers
//!
//! ## Loose-falsy emptiness
//!
//! Required template keys are checked with a loose test rather than a
//! null check. A value is falsy when it is one of:
//!
//! | JSON value | falsy |
//! |---|---|
//! | `null` | yes |
//! | `false` | yes |
//! | `0`, `0.0`, `-0.0` | yes |
//! | `""` and `"0"` | yes |
//! | `[]` and `{}` | yes |
//! | anything else | no |
//!
//! An absent key is treated the same way by callers (`map.get(k).map_or(true, is_falsy)`).
//!
//! ## Pretty printing
//!
//! Compiled definitions are rendered with four-space indentation. `/` is
//! never escaped (serde_json does not escape it), so paths and URLs stay
//! readable in the output. Non-ASCII text is emitted as raw UTF-8.

use serde::Serialize;
use serde_json::Value;

/// Indentation used by [`to_pretty_string`].
pub const PRETTY_INDENT: &[u8] = b"    ";

/// Whether `value` counts as empty under the loose-falsy rules.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Serialize `value` as pretty JSON with four-space indentation.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::with_capacity(128);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(PRETTY_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}
