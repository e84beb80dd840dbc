//! # cms-compile — Template Compilation
//!
//! Turns a template and its layout into a merged definition.
//!
//! The merge itself sits behind the [`TemplateCompiler`] trait so that the
//! validation and delegation logic can be exercised with any merge
//! strategy. [`LayoutMerger`] is the default implementation.
//!
//! ```text
//! Template + Layout ──▶ CompiledTemplate ──▶ TemplateCompiler::compile
//!                                                   │
//!                                                   ▼
//!                      CompileResponse { content } ◀── pretty JSON
//! ```

pub mod compiler;
pub mod merge;

pub use compiler::{
    compile_template, CompileError, CompileResponse, CompiledTemplate, TemplateCompiler,
    TemplateDefinition,
};
pub use merge::{merge_into, LayoutMerger, LAYOUT_KEY};
