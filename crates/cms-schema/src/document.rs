//! # JSON Schema Document
//!
//! Generates a Draft 2020-12 JSON Schema describing template content, built
//! from [`CONTENT_KEYS`] so the published document cannot drift from the
//! validator. Integrators use it for editor support and client-side checks.
//!
//! The document is exact for accept/reject decisions. Error reporting
//! differs: the validator reports one violation in a fixed order, a JSON
//! Schema engine may report several.

use serde_json::{json, Map, Value};

use crate::content::{KeyRule, CONTENT_KEYS, NAME_KEY};

/// `$id` of the generated schema.
pub const CONTENT_SCHEMA_ID: &str = "https://schemas.cms-stack.dev/template-content.schema.json";

/// Build the JSON Schema document for template content.
pub fn json_schema() -> Value {
    let mut properties = Map::new();
    for rule in CONTENT_KEYS.iter() {
        properties.insert(rule.key.to_string(), property_schema(rule));
    }

    let required: Vec<&str> = CONTENT_KEYS
        .iter()
        .filter(|rule| rule.required)
        .map(|rule| rule.key)
        .collect();

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": CONTENT_SCHEMA_ID,
        "title": "Template content",
        "type": "object",
        "minProperties": 1,
        "additionalProperties": false,
        "required": required,
        "properties": Value::Object(properties),
    })
}

fn property_schema(rule: &KeyRule) -> Value {
    if rule.key == NAME_KEY {
        // Scalar and not loose-falsy.
        return json!({
            "type": ["string", "number", "boolean"],
            "not": { "enum": [false, 0, "", "0"] },
        });
    }
    if rule.required {
        return json!({ "not": { "enum": [null, false, 0, "", "0", [], {}] } });
    }
    json!({})
}
