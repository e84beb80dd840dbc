//! # Template Content Validation
//!
//! Template content is stored as a raw JSON string. Before it is accepted,
//! it must pass three checks, applied in order:
//!
//! 1. The string parses as a non-empty JSON object.
//! 2. Every key is on the whitelist (the first unknown key, in document
//!    order, is reported).
//! 3. Every required key is present and not falsy (see
//!    [`cms_core::json::is_falsy`]).
//!
//! The only required key is `name`. Its value becomes the template's name,
//! so it must also be a scalar.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use cms_core::json::is_falsy;

/// Policy for one top-level content key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyRule {
    /// The key as it appears in the content object.
    pub key: &'static str,
    /// Whether the key must be present with a non-falsy value.
    pub required: bool,
}

/// The content key whitelist, in the order required keys are checked.
pub const CONTENT_KEYS: [KeyRule; 6] = [
    KeyRule { key: "name", required: true },
    KeyRule { key: "description", required: false },
    KeyRule { key: "filename", required: false },
    KeyRule { key: "zones", required: false },
    KeyRule { key: "modules", required: false },
    KeyRule { key: "meta", required: false },
];

/// The key whose value becomes the template name.
pub const NAME_KEY: &str = "name";

/// Reason a template content string was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Malformed JSON, a non-object value, or an empty object.
    #[error("template content is not a proper JSON object")]
    NotAnObject,

    /// A top-level key outside the whitelist.
    #[error("unknown key \"{0}\"")]
    UnknownKey(String),

    /// A required key is absent or falsy.
    #[error("template key \"{0}\" is required")]
    MissingRequiredKey(String),

    /// `name` is present and truthy but is an array or object.
    #[error("template key \"name\" must be a string, number or boolean, found {0}")]
    InvalidName(&'static str),
}

impl ContentError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAnObject => "INVALID_JSON",
            Self::UnknownKey(_) => "UNKNOWN_KEY",
            Self::MissingRequiredKey(_) => "REQUIRED_KEY_MISSING",
            Self::InvalidName(_) => "INVALID_NAME",
        }
    }
}

/// Content that passed validation, with the derived template name.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedContent {
    name: String,
    object: Map<String, Value>,
}

impl ValidatedContent {
    /// The name extracted from the `name` key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parsed content object.
    pub fn object(&self) -> &Map<String, Value> {
        &self.object
    }

    /// Split into the derived name and the parsed object.
    pub fn into_parts(self) -> (String, Map<String, Value>) {
        (self.name, self.object)
    }

    /// Re-serialize the parsed object as compact JSON.
    pub fn to_json_string(&self) -> String {
        // A Map<String, Value> always serializes.
        Value::Object(self.object.clone()).to_string()
    }
}

/// The template content schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentSchema;

impl ContentSchema {
    /// The key whitelist with per-key required flags.
    pub fn keys() -> &'static [KeyRule] {
        &CONTENT_KEYS
    }

    /// Whether `key` is allowed at the top level of template content.
    pub fn is_allowed(key: &str) -> bool {
        CONTENT_KEYS.iter().any(|rule| rule.key == key)
    }

    /// Keys that must be present and non-falsy.
    pub fn required_keys() -> impl Iterator<Item = &'static str> {
        CONTENT_KEYS
            .iter()
            .filter(|rule| rule.required)
            .map(|rule| rule.key)
    }

    /// Validate a raw JSON string.
    pub fn validate(json: &str) -> Result<ValidatedContent, ContentError> {
        let value: Value = serde_json::from_str(json).map_err(|_| ContentError::NotAnObject)?;
        Self::validate_value(value)
    }

    /// Validate an already-parsed JSON value.
    pub fn validate_value(value: Value) -> Result<ValidatedContent, ContentError> {
        let object = match value {
            Value::Object(map) if !map.is_empty() => map,
            _ => return Err(ContentError::NotAnObject),
        };

        if let Some(unknown) = object.keys().find(|k| !Self::is_allowed(k)) {
            return Err(ContentError::UnknownKey(unknown.clone()));
        }

        for key in Self::required_keys() {
            if object.get(key).map_or(true, is_falsy) {
                return Err(ContentError::MissingRequiredKey(key.to_string()));
            }
        }

        let name = match object.get(NAME_KEY) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => number_name(n),
            // `false` is falsy and rejected above.
            Some(Value::Bool(_)) => "1".to_string(),
            Some(Value::Array(_)) => return Err(ContentError::InvalidName("array")),
            Some(Value::Object(_)) => return Err(ContentError::InvalidName("object")),
            // Null and absent are falsy and rejected above.
            Some(Value::Null) | None => {
                return Err(ContentError::MissingRequiredKey(NAME_KEY.to_string()))
            }
        };

        Ok(ValidatedContent { name, object })
    }
}

/// Integers print as-is; floats drop a zero fraction (`1e2` names `"100"`).
fn number_name(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

/// Validate a raw JSON string against the template content schema.
pub fn validate(json: &str) -> Result<ValidatedContent, ContentError> {
    ContentSchema::validate(json)
}
