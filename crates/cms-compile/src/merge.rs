//! # Default Layout Merger
//!
//! [`LayoutMerger`] is the compiler the service uses when no other is
//! injected. It treats the layout's content object as the base definition
//! and overlays the template's content on it:
//!
//! - objects present on both sides merge key by key, recursively;
//! - any other value from the template replaces the layout's value;
//! - keys only the layout has are kept.
//!
//! The result also records the layout name under `"layout"`.

use serde_json::{Map, Value};

use crate::compiler::{CompileError, CompiledTemplate, TemplateCompiler, TemplateDefinition};

/// Key under which the layout name is recorded in the definition.
pub const LAYOUT_KEY: &str = "layout";

/// Deep-merges template content over layout content.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutMerger;

impl TemplateCompiler for LayoutMerger {
    fn compile(&self, request: &CompiledTemplate<'_>) -> Result<TemplateDefinition, CompileError> {
        let layout = request.layout();
        let invalid = |reason: String| CompileError::InvalidLayout {
            layout: layout.name().to_string(),
            reason,
        };

        let mut base = match layout.content_value().map_err(|e| invalid(e.to_string()))? {
            Value::Object(map) => map,
            other => {
                return Err(invalid(format!(
                    "expected a JSON object, found {}",
                    kind(&other)
                )))
            }
        };

        merge_into(&mut base, request.template().content_object());
        base.insert(LAYOUT_KEY.to_string(), Value::String(layout.name().to_string()));

        Ok(TemplateDefinition::new(Value::Object(base)))
    }
}

/// Overlay `overlay` onto `base` in place.
pub fn merge_into(base: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) = (base.get_mut(key), value)
        {
            merge_into(existing, incoming);
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
