//! # Identifier Newtypes
//!
//! Templates and layouts live in separate collections. Giving each its own
//! identifier type keeps a template id from being looked up in the layout
//! store, and vice versa.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a template record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub Uuid);

/// Unique identifier for a layout record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutId(pub Uuid);

/// Error parsing an identifier from its string form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} identifier '{input}'")]
pub struct IdentifierError {
    /// Which identifier namespace was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub input: String,
}

impl TemplateId {
    /// Generate a new random template identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl LayoutId {
    /// Generate a new random layout identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for LayoutId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TemplateId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<Uuid> for LayoutId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for TemplateId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self).map_err(|_| IdentifierError {
            kind: "template",
            input: s.to_string(),
        })
    }
}

impl FromStr for LayoutId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self).map_err(|_| IdentifierError {
            kind: "layout",
            input: s.to_string(),
        })
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "template:{}", self.0)
    }
}

impl std::fmt::Display for LayoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layout:{}", self.0)
    }
}
