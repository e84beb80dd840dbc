//! # Record Stores
//!
//! [`LayoutStore`] and [`TemplateStore`] are the lookup seams the compile
//! path and the HTTP layer depend on. The in-memory implementations are
//! built on [`Store`], a cloneable `Arc<RwLock<HashMap>>`.
//!
//! All operations are synchronous (the lock is `parking_lot`, not
//! `tokio::sync`) and no lock is ever held across an `.await`.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use cms_core::{LayoutId, TemplateId};

use crate::layout::Layout;
use crate::template::{Template, TemplateError};

/// Errors returned by store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No template with the given id.
    #[error("template {0} not found")]
    TemplateNotFound(TemplateId),

    /// No layout with the given id.
    #[error("layout {0} not found")]
    LayoutNotFound(LayoutId),

    /// A write was rejected by the record's own validation.
    #[error(transparent)]
    Rejected(#[from] TemplateError),
}

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
#[derive(Debug)]
pub struct Store<K, V> {
    data: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Clone for Store<K, V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<K: Eq + Hash, V: Clone> Store<K, V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.data.write().insert(key, value)
    }

    /// Retrieve a record by key.
    pub fn get(&self, key: &K) -> Option<V> {
        self.data.read().get(key).cloned()
    }

    /// List all records, in no particular order.
    pub fn list(&self) -> Vec<V> {
        self.data.read().values().cloned().collect()
    }

    /// Atomically read-validate-update a record.
    ///
    /// The closure runs under the write lock. Returns `None` if the key is
    /// absent, otherwise the closure's result.
    pub fn try_update<R, E>(
        &self,
        key: &K,
        f: impl FnOnce(&mut V) -> Result<R, E>,
    ) -> Option<Result<R, E>> {
        self.data.write().get_mut(key).map(f)
    }

    /// Remove a record by key.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.data.write().remove(key)
    }

    /// Check if a record exists.
    pub fn contains(&self, key: &K) -> bool {
        self.data.read().contains_key(key)
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash, V: Clone> Default for Store<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Store Traits -------------------------------------------------------------

/// Lookup and persistence for layouts.
pub trait LayoutStore: Send + Sync {
    /// Fetch a layout by id.
    fn get(&self, id: &LayoutId) -> Result<Layout, StoreError>;

    /// Insert or replace a layout.
    fn insert(&self, layout: Layout);

    /// All layouts, oldest first.
    fn list(&self) -> Vec<Layout>;
}

/// Lookup and persistence for templates.
pub trait TemplateStore: Send + Sync {
    /// Fetch a template by id.
    fn get(&self, id: &TemplateId) -> Result<Template, StoreError>;

    /// Insert or replace a template.
    fn insert(&self, template: Template);

    /// All templates, oldest first.
    fn list(&self) -> Vec<Template>;

    /// Validate `content` and, only if it passes, apply it to the stored
    /// template. Returns the updated record.
    fn set_content(&self, id: &TemplateId, content: &str) -> Result<Template, StoreError>;

    /// Delete a template, returning the removed record.
    fn remove(&self, id: &TemplateId) -> Result<Template, StoreError>;
}

// -- In-Memory Implementations ------------------------------------------------

/// Layout store backed by process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLayoutStore {
    layouts: Store<LayoutId, Layout>,
}

impl InMemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

impl LayoutStore for InMemoryLayoutStore {
    fn get(&self, id: &LayoutId) -> Result<Layout, StoreError> {
        self.layouts.get(id).ok_or(StoreError::LayoutNotFound(*id))
    }

    fn insert(&self, layout: Layout) {
        self.layouts.insert(layout.id(), layout);
    }

    fn list(&self) -> Vec<Layout> {
        let mut layouts = self.layouts.list();
        layouts.sort_by(|a, b| (a.created_at(), a.id()).cmp(&(b.created_at(), b.id())));
        layouts
    }
}

/// Template store backed by process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateStore {
    templates: Store<TemplateId, Template>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn get(&self, id: &TemplateId) -> Result<Template, StoreError> {
        self.templates
            .get(id)
            .ok_or(StoreError::TemplateNotFound(*id))
    }

    fn insert(&self, template: Template) {
        self.templates.insert(template.id(), template);
    }

    fn list(&self) -> Vec<Template> {
        let mut templates = self.templates.list();
        templates.sort_by(|a, b| (a.created_at(), a.id()).cmp(&(b.created_at(), b.id())));
        templates
    }

    fn set_content(&self, id: &TemplateId, content: &str) -> Result<Template, StoreError> {
        let result = self
            .templates
            .try_update(id, |template| {
                template.set_content(content)?;
                Ok::<_, TemplateError>(template.clone())
            })
            .ok_or(StoreError::TemplateNotFound(*id))?;

        match result {
            Ok(updated) => {
                tracing::debug!(template_id = %id, name = updated.name(), "template content replaced");
                Ok(updated)
            }
            Err(err) => {
                tracing::debug!(template_id = %id, error = %err, "template content rejected");
                Err(err.into())
            }
        }
    }

    fn remove(&self, id: &TemplateId) -> Result<Template, StoreError> {
        self.templates
            .remove(id)
            .ok_or(StoreError::TemplateNotFound(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_schema::ContentError;

    fn seeded() -> (InMemoryLayoutStore, InMemoryTemplateStore, Layout, Template) {
        let layouts = InMemoryLayoutStore::new();
        let templates = InMemoryTemplateStore::new();
        let layout = Layout::new("base", r#"{"zones":{"main":[]}}"#);
        layouts.insert(layout.clone());
        let template = Template::new(r#"{"name":"home"}"#, layout.id()).unwrap();
        templates.insert(template.clone());
        (layouts, templates, layout, template)
    }

    #[test]
    fn layout_lookup() {
        let (layouts, _, layout, _) = seeded();
        assert_eq!(layouts.get(&layout.id()).unwrap(), layout);
        let missing = LayoutId::new();
        assert_eq!(
            layouts.get(&missing).unwrap_err(),
            StoreError::LayoutNotFound(missing)
        );
    }

    #[test]
    fn template_lookup_and_remove() {
        let (_, templates, _, template) = seeded();
        assert_eq!(templates.get(&template.id()).unwrap().name(), "home");
        assert_eq!(templates.remove(&template.id()).unwrap().id(), template.id());
        assert!(templates.is_empty());
        assert_eq!(
            templates.remove(&template.id()).unwrap_err(),
            StoreError::TemplateNotFound(template.id())
        );
    }

    #[test]
    fn set_content_applies_valid_write() {
        let (_, templates, _, template) = seeded();
        let updated = templates
            .set_content(&template.id(), r#"{"name":"about"}"#)
            .unwrap();
        assert_eq!(updated.name(), "about");
        assert_eq!(templates.get(&template.id()).unwrap().name(), "about");
    }

    #[test]
    fn set_content_rejection_keeps_stored_record() {
        let (_, templates, _, template) = seeded();
        let err = templates
            .set_content(&template.id(), r#"{"title":"about"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::Rejected(TemplateError::InvalidContent(ContentError::UnknownKey(
                "title".into()
            )))
        );
        assert_eq!(templates.get(&template.id()).unwrap(), template);
    }

    #[test]
    fn set_content_on_missing_template() {
        let templates = InMemoryTemplateStore::new();
        let id = TemplateId::new();
        assert_eq!(
            templates.set_content(&id, r#"{"name":"x"}"#).unwrap_err(),
            StoreError::TemplateNotFound(id)
        );
    }

    #[test]
    fn layouts_shared_across_templates() {
        let (layouts, templates, layout, _) = seeded();
        let second = Template::new(r#"{"name":"contact"}"#, layout.id()).unwrap();
        templates.insert(second);
        assert_eq!(templates.len(), 2);
        assert_eq!(layouts.len(), 1);
        assert!(templates.list().iter().all(|t| t.layout() == layout.id()));
    }

    #[test]
    fn clones_share_data() {
        let store: Store<u32, String> = Store::new();
        let clone = store.clone();
        clone.insert(1, "one".into());
        assert!(store.contains(&1));
        assert_eq!(store.get(&1).as_deref(), Some("one"));
    }
}
