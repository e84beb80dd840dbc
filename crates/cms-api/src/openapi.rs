//! # OpenAPI Specification Assembly
//!
//! Collects the utoipa-documented handlers into one document served at
//! `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// OpenAPI document for the whole API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CMS API — Template Compilation",
        version = "0.1.0",
        description = "Template and layout records, content validation, and template compilation.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::compile::compile,
        crate::routes::templates::create_template,
        crate::routes::templates::list_templates,
        crate::routes::templates::get_template,
        crate::routes::templates::set_content,
        crate::routes::templates::delete_template,
        crate::routes::templates::content_schema,
        crate::routes::layouts::create_layout,
        crate::routes::layouts::list_layouts,
        crate::routes::layouts::get_layout,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::compile::CompiledDefinition,
        crate::routes::templates::TemplateRecord,
        crate::routes::templates::CreateTemplateRequest,
        crate::routes::templates::SetContentRequest,
        crate::routes::layouts::LayoutRecord,
        crate::routes::layouts::CreateLayoutRequest,
    )),
    tags(
        (name = "compile", description = "Template compilation"),
        (name = "templates", description = "Template records"),
        (name = "layouts", description = "Layout records"),
    )
)]
pub struct ApiDoc;

/// Serve the document at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
