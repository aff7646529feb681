//! API integration tests.
//!
//! The router is exercised end-to-end with `tower::ServiceExt::oneshot`; the
//! classifier is replaced by a stub model so no ONNX runtime is needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use ndarray::Array4;
use tower::ServiceExt;

use moodlens_api::{create_router, ApiConfig, AppState};
use moodlens_inference::{EmotionModel, InferenceResult};

/// Stub model emitting a fixed score vector.
struct FixedModel(Vec<f32>);

impl EmotionModel for FixedModel {
    fn scores(&self, _input: &Array4<f32>) -> InferenceResult<Vec<f32>> {
        Ok(self.0.clone())
    }
}

fn app_with_model(scores: Vec<f32>) -> Router {
    let state = AppState::with_model(ApiConfig::default(), Some(Arc::new(FixedModel(scores))));
    create_router(state, None)
}

fn app_without_model() -> Router {
    let state = AppState::with_model(ApiConfig::default(), None);
    create_router(state, None)
}

/// Encode a small gradient image as PNG bytes.
fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_fn(64, 64, |x, y| {
        image::Rgb([(x * 4) as u8, (y * 4) as u8, 128])
    });
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageOutputFormat::Png,
        )
        .unwrap();
    bytes
}

/// Build a multipart POST to /predict with one file field.
fn predict_request(field: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "moodlens-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; \
             filename=\"face.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Test health endpoint.
#[tokio::test]
async fn test_health_endpoint() {
    let response = app_without_model()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}

/// Readiness degrades while the classifier is unloaded.
#[tokio::test]
async fn test_ready_degraded_without_model() {
    let response = app_without_model()
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["model"]["status"], "error");
}

#[tokio::test]
async fn test_ready_ok_with_model() {
    let app = app_with_model(vec![0.1, 0.1, 0.1, 0.2, 0.2, 0.2, 0.1]);
    let response = app
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// Predictions fail fast with 503 while the classifier is unloaded, even for
/// a well-formed upload.
#[tokio::test]
async fn test_predict_without_model_returns_503() {
    let response = app_without_model()
        .oneshot(predict_request("image", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Model not loaded. Please train the model first.");
}

/// Uploads without the image field are rejected before normalization.
#[tokio::test]
async fn test_predict_missing_field_returns_400() {
    let app = app_with_model(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let response = app
        .oneshot(predict_request("attachment", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "No image provided");
}

/// Undecodable bytes are rejected with the decode error.
#[tokio::test]
async fn test_predict_invalid_image_returns_400() {
    let app = app_with_model(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let response = app
        .oneshot(predict_request("image", b"not an image at all"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid image");
}

/// Full happy path: upload -> normalize -> score -> labeled response.
#[tokio::test]
async fn test_predict_happy_path() {
    let app = app_with_model(vec![0.05, 0.01, 0.04, 0.7, 0.1, 0.05, 0.05]);
    let response = app
        .oneshot(predict_request("image", &png_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["mood"], "Happy");
    assert!((json["confidence"].as_f64().unwrap() - 0.7).abs() < 1e-6);

    let all_scores = json["all_scores"].as_object().unwrap();
    assert_eq!(all_scores.len(), 7);
    let sum: f64 = all_scores.values().map(|v| v.as_f64().unwrap()).sum();
    assert!((sum - 1.0).abs() < 1e-5);
}

/// Identical bytes and a fixed classifier reproduce the identical response.
#[tokio::test]
async fn test_predict_deterministic() {
    let app = app_with_model(vec![0.3, 0.1, 0.1, 0.2, 0.1, 0.1, 0.1]);
    let bytes = png_bytes();

    let first = app
        .clone()
        .oneshot(predict_request("image", &bytes))
        .await
        .unwrap();
    let second = app
        .oneshot(predict_request("image", &bytes))
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(first).await, body_json(second).await);
}

/// Test CORS headers.
#[tokio::test]
async fn test_cors_preflight() {
    let response = app_without_model()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/predict")
                .header("Origin", "http://localhost:3000")
                .header("Access-Control-Request-Method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // CORS preflight should return OK or NO_CONTENT
    assert!(
        response.status() == StatusCode::OK || response.status() == StatusCode::NO_CONTENT
    );
}

/// Test security headers.
#[tokio::test]
async fn test_security_headers() {
    let response = app_without_model()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
    assert!(headers.contains_key("X-Request-ID"));
}

/// Metrics route only exists when a recorder handle is provided.
#[tokio::test]
async fn test_metrics_endpoint_absent_when_disabled() {
    let response = app_without_model()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
