//! # cms-api — Axum Service for the CMS Stack
//!
//! ## API Surface
//!
//! | Prefix                | Module                   | Purpose                    |
//! |-----------------------|--------------------------|----------------------------|
//! | `/compile/{template}` | [`routes::compile`]      | Template compilation       |
//! | `/v1/templates/*`     | [`routes::templates`]    | Template records           |
//! | `/v1/layouts/*`       | [`routes::layouts`]      | Layout records             |
//! | `/openapi.json`       | [`openapi`]              | OpenAPI document           |
//! | `/health/*`           | this module              | Probes (unauthenticated)   |
//! | `/metrics`            | this module              | Prometheus (unauthenticated) |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → AuthMiddleware → Handler
//! ```
//!
//! ## Crate Policy
//!
//! - Handlers hold no business rules; validation lives in `cms-schema`,
//!   record invariants in `cms-entity`, merging in `cms-compile`.
//! - All errors map to structured HTTP responses via [`AppError`].

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::{AppConfig, AppState};

use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::middleware::metrics::ApiMetrics;

/// Assemble the application router.
///
/// Health probes and `/metrics` are mounted outside the auth middleware.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
    };

    let metrics = if state.config.metrics_enabled {
        match ApiMetrics::new() {
            Ok(metrics) => Some(metrics),
            Err(e) => {
                tracing::error!(error = %e, "failed to register metrics; continuing without them");
                None
            }
        }
    } else {
        None
    };

    let mut api = Router::new()
        .merge(routes::compile::router())
        .merge(routes::templates::router())
        .merge(routes::layouts::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(from_fn(auth::auth_middleware));

    if let Some(metrics) = &metrics {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(metrics.clone()));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .layer(Extension(auth_config))
        .with_state(state.clone());

    let mut unauthenticated = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if let Some(metrics) = metrics {
        unauthenticated = unauthenticated
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(Extension(metrics));
    }

    Router::new()
        .merge(unauthenticated.with_state(state))
        .merge(api)
}

/// GET /metrics — Prometheus scrape endpoint.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    metrics.set_record_counts(state.templates.list().len(), state.layouts.list().len());

    match metrics.gather_and_encode() {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe. The stores are in-process, so ready once serving.
async fn readiness() -> &'static str {
    "ready"
}
