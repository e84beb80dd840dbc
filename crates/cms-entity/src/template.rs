//! # Template Record
//!
//! A template is a JSON document describing zones and modules, bound to
//! exactly one [`Layout`](crate::Layout).
//!
//! ## Invariants
//!
//! - `content` always passes [`ContentSchema::validate`].
//! - `name` always equals the `"name"` value embedded in `content`. There is
//!   no setter for `name`; it changes only through [`Template::set_content`].
//! - `layout` is always set. The constructor takes a [`LayoutId`], not an
//!   `Option`.
//!
//! ## Reject-before-mutate
//!
//! `set_content` validates the candidate string first and only then
//! replaces `content`, `name` and the parsed object together. A rejected
//! write leaves the record exactly as it was.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use cms_core::{LayoutId, TemplateId};
use cms_schema::{ContentError, ContentSchema};

/// Errors raised when writing template fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The content string failed schema validation.
    #[error("invalid template content: {0}")]
    InvalidContent(#[from] ContentError),
}

impl TemplateError {
    /// Machine-readable error code of the underlying violation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidContent(err) => err.code(),
        }
    }
}

/// A persisted template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    id: TemplateId,
    name: String,
    content: String,
    layout: LayoutId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(skip)]
    object: Map<String, Value>,
}

impl Template {
    /// Create a template with a fresh identifier.
    pub fn new(content: impl Into<String>, layout: LayoutId) -> Result<Self, TemplateError> {
        let content = content.into();
        let (name, object) = ContentSchema::validate(&content)?.into_parts();
        let now = Utc::now();
        Ok(Self {
            id: TemplateId::new(),
            name,
            content,
            layout,
            created_at: now,
            updated_at: now,
            object,
        })
    }

    /// Replace the content, re-deriving the name.
    ///
    /// On error the template is unchanged.
    pub fn set_content(&mut self, content: impl Into<String>) -> Result<(), TemplateError> {
        let content = content.into();
        let (name, object) = ContentSchema::validate(&content)?.into_parts();
        self.name = name;
        self.content = content;
        self.object = object;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn id(&self) -> TemplateId {
        self.id
    }

    /// Name derived from the content's `"name"` key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw content string, exactly as written.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Parsed content object.
    pub fn content_object(&self) -> &Map<String, Value> {
        &self.object
    }

    pub fn layout(&self) -> LayoutId {
        self.layout
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Templates display as their name.
impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> LayoutId {
        LayoutId::new()
    }

    #[test]
    fn new_derives_name_from_content() {
        let t = Template::new(r#"{"name":"home"}"#, layout()).unwrap();
        assert_eq!(t.name(), "home");
        assert_eq!(t.content(), r#"{"name":"home"}"#);
        assert_eq!(t.to_string(), "home");
    }

    #[test]
    fn new_rejects_invalid_content() {
        let err = Template::new(r#"{"title":"home"}"#, layout()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::InvalidContent(ContentError::UnknownKey("title".into()))
        );
        assert_eq!(err.code(), "UNKNOWN_KEY");
    }

    #[test]
    fn set_content_updates_name_and_content_together() {
        let mut t = Template::new(r#"{"name":"home"}"#, layout()).unwrap();
        t.set_content(r#"{"name":"about","description":"About us"}"#)
            .unwrap();
        assert_eq!(t.name(), "about");
        assert_eq!(t.content_object()["description"], "About us");
        assert!(t.updated_at() >= t.created_at());
    }

    #[test]
    fn rejected_write_leaves_template_unchanged() {
        let mut t = Template::new(r#"{"name":"home"}"#, layout()).unwrap();
        let before = t.clone();
        for bad in ["not json", r#"{"title":"x"}"#, r#"{"description":"x"}"#, r#"{"name":""}"#] {
            assert!(t.set_content(bad).is_err(), "{bad} should be rejected");
            assert_eq!(t, before);
        }
    }

    #[test]
    fn layout_reference_is_kept() {
        let l = layout();
        let mut t = Template::new(r#"{"name":"home"}"#, l).unwrap();
        assert_eq!(t.layout(), l);
        t.set_content(r#"{"name":"about"}"#).unwrap();
        assert_eq!(t.layout(), l);
    }

    #[test]
    fn serialized_view_omits_parsed_object() {
        let t = Template::new(r#"{"name":"home"}"#, layout()).unwrap();
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["name"], "home");
        assert_eq!(v["content"], r#"{"name":"home"}"#);
        assert!(v.get("object").is_none());
        assert!(v.get("layout").is_some());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Name and content never diverge, whatever sequence of writes
            /// (valid or not) is applied.
            #[test]
            fn name_tracks_content(names in prop::collection::vec("[a-z0-9]{0,6}", 1..10)) {
                let mut t = Template::new(r#"{"name":"start"}"#, LayoutId::new()).unwrap();
                for name in names {
                    let content = serde_json::json!({ "name": name }).to_string();
                    let _ = t.set_content(content);
                    let embedded = ContentSchema::validate(t.content()).unwrap();
                    prop_assert_eq!(embedded.name(), t.name());
                }
            }
        }
    }
}
