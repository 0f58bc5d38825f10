//! Prometheus metrics handler
//!
//! `GET /metrics` renders the `metrics-exporter-prometheus` recorder in the
//! Prometheus text format. Besides HTTP traffic it carries
//! `fare_quotes_total{kind, outcome}` and `price_rules_published_total{kind}`.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// Shared state for the metrics endpoint
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// `GET /metrics`: Prometheus scrape endpoint
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    let body = state.handle.render();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}
