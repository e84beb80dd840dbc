//! # Compile Delegation
//!
//! Compiling a template means handing the template and its layout to a
//! [`TemplateCompiler`] and rendering whatever definition it returns as
//! pretty JSON, wrapped in a [`CompileResponse`].
//!
//! This module never inspects the definition. Errors from the compiler are
//! returned as-is; nothing is retried or cached.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use cms_core::{to_pretty_string, LayoutId};
use cms_entity::{Layout, Template};

/// Errors raised while compiling a template.
#[derive(Error, Debug)]
pub enum CompileError {
    /// The layout content cannot be used as a merge base.
    #[error("layout '{layout}' cannot be compiled: {reason}")]
    InvalidLayout {
        /// Layout name.
        layout: String,
        /// Why the layout was rejected.
        reason: String,
    },

    /// The supplied layout is not the one the template references.
    #[error("template '{template}' references {expected}, but {found} was supplied")]
    LayoutMismatch {
        /// Template name.
        template: String,
        /// Layout the template references.
        expected: LayoutId,
        /// Layout that was passed in.
        found: LayoutId,
    },

    /// The compiled definition could not be rendered.
    #[error("failed to serialize compiled definition: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure reported by a compiler implementation.
    #[error("merge failed: {0}")]
    Merge(String),
}

/// The merged definition produced by a compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateDefinition(Value);

impl TemplateDefinition {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Merge request: a template together with the layout it references.
#[derive(Debug, Clone, Copy)]
pub struct CompiledTemplate<'a> {
    template: &'a Template,
    layout: &'a Layout,
}

impl<'a> CompiledTemplate<'a> {
    /// Build a merge request. Fails if `layout` is not the template's layout.
    pub fn new(template: &'a Template, layout: &'a Layout) -> Result<Self, CompileError> {
        if template.layout() != layout.id() {
            return Err(CompileError::LayoutMismatch {
                template: template.name().to_string(),
                expected: template.layout(),
                found: layout.id(),
            });
        }
        Ok(Self { template, layout })
    }

    pub fn template(&self) -> &'a Template {
        self.template
    }

    pub fn layout(&self) -> &'a Layout {
        self.layout
    }
}

/// Produces a template definition from a merge request.
pub trait TemplateCompiler: Send + Sync {
    fn compile(&self, request: &CompiledTemplate<'_>) -> Result<TemplateDefinition, CompileError>;
}

/// Result of compiling a template: the definition as pretty JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileResponse {
    pub content: String,
}

/// Compile `template` against `layout` with the given compiler.
pub fn compile_template(
    compiler: &dyn TemplateCompiler,
    template: &Template,
    layout: &Layout,
) -> Result<CompileResponse, CompileError> {
    let request = CompiledTemplate::new(template, layout)?;
    let definition = compiler.compile(&request)?;
    let content = to_pretty_string(&definition)?;
    tracing::debug!(
        template_id = %template.id(),
        layout_id = %layout.id(),
        bytes = content.len(),
        "template compiled"
    );
    Ok(CompileResponse { content })
}
