//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "moodlens_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "moodlens_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "moodlens_http_requests_in_flight";

    // Prediction metrics
    pub const PREDICTIONS_TOTAL: &str = "moodlens_predictions_total";
    pub const PREDICTION_DURATION_SECONDS: &str = "moodlens_prediction_duration_seconds";
    pub const DECODE_FAILURES_TOTAL: &str = "moodlens_decode_failures_total";

    // Classifier state
    pub const MODEL_LOADED: &str = "moodlens_model_loaded";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a completed prediction.
pub fn record_prediction(mood: &str, duration_secs: f64) {
    let labels = [("mood", mood.to_string())];
    counter!(names::PREDICTIONS_TOTAL, &labels).increment(1);
    histogram!(names::PREDICTION_DURATION_SECONDS).record(duration_secs);
}

/// Record an upload that failed to decode.
pub fn record_decode_failure() {
    counter!(names::DECODE_FAILURES_TOTAL).increment(1);
}

/// Set the classifier-loaded gauge.
pub fn set_model_loaded(loaded: bool) {
    gauge!(names::MODEL_LOADED).set(if loaded { 1.0 } else { 0.0 });
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    // Increment in-flight counter
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    // Decrement in-flight counter
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
