//! # Layout Record
//!
//! Structural definition a template is rendered against. Layouts are shared:
//! any number of templates may reference one, and none of them owns it.
//! Layout content is opaque here; only the compiler interprets it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use cms_core::LayoutId;

/// A persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    id: LayoutId,
    name: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl Layout {
    /// Create a layout with a fresh identifier.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: LayoutId::new(),
            name: name.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> LayoutId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw content string.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Parse the content as JSON.
    pub fn content_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.content)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
