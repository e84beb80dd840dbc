//! # Template Records API
//!
//! ## Endpoints
//!
//! - `POST /v1/templates` — create template
//! - `GET /v1/templates` — list templates
//! - `GET /v1/templates/schema` — content JSON Schema
//! - `GET /v1/templates/{id}` — get template
//! - `PUT /v1/templates/{id}/content` — replace content
//! - `DELETE /v1/templates/{id}` — delete template
//!
//! Creation resolves the referenced layout before validating content, so a
//! template can never exist without one.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use cms_core::{LayoutId, TemplateId};
use cms_entity::Template;

use crate::error::AppError;
use crate::extractors::{extract_id, extract_json};
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// A stored template.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TemplateRecord {
    pub id: Uuid,
    /// Derived from the `name` key of `content`.
    pub name: String,
    /// Raw JSON content string.
    pub content: String,
    pub layout_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Template> for TemplateRecord {
    fn from(template: &Template) -> Self {
        Self {
            id: *template.id().as_uuid(),
            name: template.name().to_string(),
            content: template.content().to_string(),
            layout_id: *template.layout().as_uuid(),
            created_at: template.created_at(),
            updated_at: template.updated_at(),
        }
    }
}

/// Request to create a template.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTemplateRequest {
    /// Layout the template is rendered against. Must exist.
    pub layout_id: Uuid,
    /// JSON content string, e.g. `{"name":"home"}`.
    pub content: String,
}

/// Request to replace a template's content.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetContentRequest {
    pub content: String,
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the templates router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/templates", get(list_templates).post(create_template))
        .route("/v1/templates/schema", get(content_schema))
        .route(
            "/v1/templates/{id}",
            get(get_template).delete(delete_template),
        )
        .route("/v1/templates/{id}/content", put(set_content))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/templates — Create a template.
#[utoipa::path(
    post,
    path = "/v1/templates",
    request_body = CreateTemplateRequest,
    responses(
        (status = 201, description = "Template created", body = TemplateRecord),
        (status = 404, description = "Layout not found", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid content", body = crate::error::ErrorBody),
    ),
    tag = "templates"
)]
pub(crate) async fn create_template(
    State(state): State<AppState>,
    body: Result<Json<CreateTemplateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TemplateRecord>), AppError> {
    let req = extract_json(body)?;
    let layout = state.layouts.get(&LayoutId::from(req.layout_id))?;
    let template = Template::new(req.content, layout.id())?;
    let record = TemplateRecord::from(&template);
    tracing::info!(template_id = %template.id(), layout_id = %layout.id(), name = template.name(), "template created");
    state.templates.insert(template);
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/templates — List templates, oldest first.
#[utoipa::path(
    get,
    path = "/v1/templates",
    responses(
        (status = 200, description = "List of templates", body = Vec<TemplateRecord>),
    ),
    tag = "templates"
)]
pub(crate) async fn list_templates(State(state): State<AppState>) -> Json<Vec<TemplateRecord>> {
    Json(state.templates.list().iter().map(TemplateRecord::from).collect())
}

/// GET /v1/templates/{id} — Get a template.
#[utoipa::path(
    get,
    path = "/v1/templates/{id}",
    params(("id" = Uuid, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Template found", body = TemplateRecord),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorBody),
        (status = 404, description = "Template not found", body = crate::error::ErrorBody),
    ),
    tag = "templates"
)]
pub(crate) async fn get_template(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<TemplateRecord>, AppError> {
    let id: TemplateId = extract_id(id)?;
    let template = state.templates.get(&id)?;
    Ok(Json(TemplateRecord::from(&template)))
}

/// PUT /v1/templates/{id}/content — Replace content.
///
/// A rejected write leaves the stored template unchanged.
#[utoipa::path(
    put,
    path = "/v1/templates/{id}/content",
    params(("id" = Uuid, Path, description = "Template ID")),
    request_body = SetContentRequest,
    responses(
        (status = 200, description = "Content replaced", body = TemplateRecord),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorBody),
        (status = 404, description = "Template not found", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid content", body = crate::error::ErrorBody),
    ),
    tag = "templates"
)]
pub(crate) async fn set_content(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<SetContentRequest>, JsonRejection>,
) -> Result<Json<TemplateRecord>, AppError> {
    let id: TemplateId = extract_id(id)?;
    let req = extract_json(body)?;
    let updated = state.templates.set_content(&id, &req.content)?;
    Ok(Json(TemplateRecord::from(&updated)))
}

/// DELETE /v1/templates/{id} — Delete a template.
#[utoipa::path(
    delete,
    path = "/v1/templates/{id}",
    params(("id" = Uuid, Path, description = "Template ID")),
    responses(
        (status = 204, description = "Template deleted"),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorBody),
        (status = 404, description = "Template not found", body = crate::error::ErrorBody),
    ),
    tag = "templates"
)]
pub(crate) async fn delete_template(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id: TemplateId = extract_id(id)?;
    let removed = state.templates.remove(&id)?;
    tracing::info!(template_id = %removed.id(), name = removed.name(), "template deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/templates/schema — JSON Schema for template content.
#[utoipa::path(
    get,
    path = "/v1/templates/schema",
    responses(
        (status = 200, description = "Draft 2020-12 JSON Schema", body = serde_json::Value),
    ),
    tag = "templates"
)]
pub(crate) async fn content_schema() -> Json<serde_json::Value> {
    Json(cms_schema::json_schema())
}
