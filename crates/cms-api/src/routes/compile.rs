//! # Template Compilation Endpoint
//!
//! `GET /compile/{template}` loads the template, resolves its layout, and
//! returns the compiler's definition as pretty-printed JSON text inside
//! `{"content": "..."}`. Nothing is cached; every call recompiles.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use cms_compile::{compile_template, CompileResponse};
use cms_core::TemplateId;

use crate::error::AppError;
use crate::extractors::extract_id;
use crate::state::AppState;

/// Compiled template definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompiledDefinition {
    /// Pretty-printed JSON text (four-space indent, unescaped slashes).
    pub content: String,
}

impl From<CompileResponse> for CompiledDefinition {
    fn from(response: CompileResponse) -> Self {
        Self {
            content: response.content,
        }
    }
}

/// Build the compile router.
pub fn router() -> Router<AppState> {
    Router::new().route("/compile/{template}", get(compile))
}

/// GET /compile/{template} — Compile a template against its layout.
#[utoipa::path(
    get,
    path = "/compile/{template}",
    params(("template" = Uuid, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Compiled definition", body = CompiledDefinition),
        (status = 400, description = "Malformed template ID", body = crate::error::ErrorBody),
        (status = 404, description = "Template or layout not found", body = crate::error::ErrorBody),
        (status = 422, description = "Layout cannot be compiled", body = crate::error::ErrorBody),
        (status = 500, description = "Compiler failure", body = crate::error::ErrorBody),
    ),
    tag = "compile"
)]
pub(crate) async fn compile(
    State(state): State<AppState>,
    template: Result<Path<String>, PathRejection>,
) -> Result<Json<CompiledDefinition>, AppError> {
    let id: TemplateId = extract_id(template)?;
    let template = state.templates.get(&id)?;
    let layout = state.layouts.get(&template.layout())?;
    let response = compile_template(state.compiler.as_ref(), &template, &layout)?;
    Ok(Json(response.into()))
}
