//! # Prometheus Metrics
//!
//! Each router owns its own `prometheus::Registry`, so separate app
//! instances (and tests) never share counters.
//!
//! HTTP metrics are recorded by [`metrics_middleware`]. The record gauges
//! (`cms_templates_total`, `cms_layouts_total`) are set from the stores on
//! every `/metrics` scrape.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use prometheus::core::Collector;
use prometheus::{
    Encoder, Gauge, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Shared metrics handles backed by one registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,
    templates_total: Gauge,
    layouts_total: Gauge,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create and register all metrics in a fresh registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("cms_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )?;
        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "cms_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
            &["method", "path"],
        )?;
        let http_errors_total = IntCounterVec::new(
            Opts::new("cms_http_errors_total", "Total HTTP errors (4xx and 5xx)"),
            &["method", "path", "status"],
        )?;
        let templates_total = Gauge::new("cms_templates_total", "Stored templates")?;
        let layouts_total = Gauge::new("cms_layouts_total", "Stored layouts")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_errors_total.clone()))?;
        registry.register(Box::new(templates_total.clone()))?;
        registry.register(Box::new(layouts_total.clone()))?;

        Ok(Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                templates_total,
                layouts_total,
            }),
        })
    }

    /// Total request count across all labels.
    pub fn requests(&self) -> u64 {
        sum_counter(&self.inner.http_requests_total)
    }

    /// Total 4xx/5xx count across all labels.
    pub fn errors(&self) -> u64 {
        sum_counter(&self.inner.http_errors_total)
    }

    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status])
            .inc();
        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);
        if status.starts_with('4') || status.starts_with('5') {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status])
                .inc();
        }
    }

    /// Set the record gauges.
    pub fn set_record_counts(&self, templates: usize, layouts: usize) {
        self.inner.templates_total.set(templates as f64);
        self.inner.layouts_total.set(layouts as f64);
    }

    /// Gather all metrics in Prometheus text exposition format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.inner.registry.gather(), &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer).map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

fn sum_counter(counter: &IntCounterVec) -> u64 {
    counter
        .collect()
        .iter()
        .flat_map(|family| family.get_metric())
        .map(|m| m.get_counter().get_value() as u64)
        .sum()
}

/// Path label for requests that matched no route.
const UNMATCHED_PATH: &str = "unmatched";

/// The route template the request matched, e.g. `/compile/{template}`.
///
/// Raw URIs never become labels, so series are bounded by the route table.
fn path_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_PATH, MatchedPath::as_str)
        .to_string()
}

/// Middleware that records HTTP request metrics.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = path_label(&request);
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.record_request(
            &method,
            &path,
            response.status().as_u16(),
            start.elapsed().as_secs_f64(),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let m = ApiMetrics::new().unwrap();
        assert_eq!(m.requests(), 0);
        assert_eq!(m.errors(), 0);
    }

    #[test]
    fn counts_requests_and_errors() {
        let m = ApiMetrics::new().unwrap();
        m.record_request("GET", "/compile/{id}", 200, 0.002);
        m.record_request("GET", "/compile/{id}", 404, 0.001);
        m.record_request("POST", "/v1/templates", 422, 0.003);
        m.record_request("GET", "/compile/{id}", 500, 0.004);
        assert_eq!(m.requests(), 4);
        assert_eq!(m.errors(), 3);
    }

    #[test]
    fn instances_do_not_share_counters() {
        let a = ApiMetrics::new().unwrap();
        let b = ApiMetrics::new().unwrap();
        a.record_request("GET", "/v1/layouts", 200, 0.001);
        assert_eq!(a.requests(), 1);
        assert_eq!(b.requests(), 0);
    }

    #[test]
    fn clones_share_counters() {
        let m = ApiMetrics::new().unwrap();
        m.clone().record_request("GET", "/v1/layouts", 200, 0.001);
        assert_eq!(m.requests(), 1);
    }

    #[test]
    fn encoded_output_includes_gauges() {
        let m = ApiMetrics::new().unwrap();
        m.set_record_counts(3, 1);
        m.record_request("GET", "/v1/templates", 200, 0.001);
        let text = m.gather_and_encode().unwrap();
        assert!(text.contains("cms_http_requests_total"));
        assert!(text.contains("cms_templates_total 3"));
        assert!(text.contains("cms_layouts_total 1"));
    }

    #[test]
    fn unrouted_request_gets_fixed_label() {
        let request = axum::http::Request::builder()
            .uri("/compile/junk-1")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(path_label(&request), UNMATCHED_PATH);
    }
}
