//! # Layout Records API
//!
//! - `POST /v1/layouts` — create layout
//! - `GET /v1/layouts` — list layouts
//! - `GET /v1/layouts/{id}` — get layout

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use cms_core::LayoutId;
use cms_entity::Layout;

use crate::error::AppError;
use crate::extractors::{extract_id, extract_validated_json, Validate};
use crate::state::AppState;

/// A stored layout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LayoutRecord {
    pub id: Uuid,
    pub name: String,
    /// Raw JSON content string.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Layout> for LayoutRecord {
    fn from(layout: &Layout) -> Self {
        Self {
            id: *layout.id().as_uuid(),
            name: layout.name().to_string(),
            content: layout.content().to_string(),
            created_at: layout.created_at(),
        }
    }
}

/// Request to create a layout.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLayoutRequest {
    pub name: String,
    /// JSON object string used as the base of compiled definitions.
    pub content: String,
}

impl Validate for CreateLayoutRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        match serde_json::from_str::<serde_json::Value>(&self.content) {
            Ok(serde_json::Value::Object(_)) => Ok(()),
            Ok(_) => Err("content must be a JSON object".to_string()),
            Err(e) => Err(format!("content is not valid JSON: {e}")),
        }
    }
}

/// Build the layouts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/layouts", get(list_layouts).post(create_layout))
        .route("/v1/layouts/{id}", get(get_layout))
}

/// POST /v1/layouts — Create a layout.
#[utoipa::path(
    post,
    path = "/v1/layouts",
    request_body = CreateLayoutRequest,
    responses(
        (status = 201, description = "Layout created", body = LayoutRecord),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "layouts"
)]
pub(crate) async fn create_layout(
    State(state): State<AppState>,
    body: Result<Json<CreateLayoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LayoutRecord>), AppError> {
    let req = extract_validated_json(body)?;
    let layout = Layout::new(req.name, req.content);
    let record = LayoutRecord::from(&layout);
    tracing::info!(layout_id = %layout.id(), name = layout.name(), "layout created");
    state.layouts.insert(layout);
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/layouts — List layouts, oldest first.
#[utoipa::path(
    get,
    path = "/v1/layouts",
    responses(
        (status = 200, description = "List of layouts", body = Vec<LayoutRecord>),
    ),
    tag = "layouts"
)]
pub(crate) async fn list_layouts(State(state): State<AppState>) -> Json<Vec<LayoutRecord>> {
    Json(state.layouts.list().iter().map(LayoutRecord::from).collect())
}

/// GET /v1/layouts/{id} — Get a layout.
#[utoipa::path(
    get,
    path = "/v1/layouts/{id}",
    params(("id" = Uuid, Path, description = "Layout ID")),
    responses(
        (status = 200, description = "Layout found", body = LayoutRecord),
        (status = 400, description = "Malformed ID", body = crate::error::ErrorBody),
        (status = 404, description = "Layout not found", body = crate::error::ErrorBody),
    ),
    tag = "layouts"
)]
pub(crate) async fn get_layout(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<LayoutRecord>, AppError> {
    let id: LayoutId = extract_id(id)?;
    let layout = state.layouts.get(&id)?;
    Ok(Json(LayoutRecord::from(&layout)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, content: &str) -> CreateLayoutRequest {
        CreateLayoutRequest {
            name: name.into(),
            content: content.into(),
        }
    }

    #[test]
    fn object_content_accepted() {
        assert!(request("base", r#"{"zones":{}}"#).validate().is_ok());
    }

    #[test]
    fn blank_name_rejected() {
        assert!(request("  ", "{}").validate().is_err());
    }

    #[test]
    fn non_object_content_rejected() {
        assert_eq!(
            request("base", "[]").validate().unwrap_err(),
            "content must be a JSON object"
        );
        assert!(request("base", "{").validate().unwrap_err().contains("not valid JSON"));
    }
}
