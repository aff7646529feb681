//! Prediction endpoint.

use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::debug;

use moodlens_inference::{normalizer, scorer, InferenceError};
use moodlens_models::Prediction;

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

/// Multipart field name carrying the uploaded image.
const IMAGE_FIELD: &str = "image";

/// Classify the emotion in an uploaded face image.
///
/// Accepts a multipart form with a file field named `image` and responds
/// with the predicted mood, its confidence, and the full per-label score
/// map. The upload is never touched when the classifier is unloaded.
pub async fn predict(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Prediction>> {
    let model = state.model.clone().ok_or(ApiError::ModelUnavailable)?;

    let bytes = read_image_field(&mut multipart).await?;

    // Decode and score off the async executor; both are CPU-bound.
    let start = Instant::now();
    let result = tokio::task::spawn_blocking(move || {
        let tensor = normalizer::normalize(&bytes)?;
        scorer::predict(model.as_ref(), &tensor)
    })
    .await
    .map_err(|e| ApiError::internal(format!("scoring task panicked: {e}")))?;

    let prediction = match result {
        Ok(prediction) => prediction,
        Err(err) => {
            if matches!(err, InferenceError::Decode(_)) {
                metrics::record_decode_failure();
            }
            return Err(err.into());
        }
    };

    metrics::record_prediction(prediction.mood.as_str(), start.elapsed().as_secs_f64());
    debug!(
        mood = %prediction.mood,
        confidence = prediction.confidence,
        "Prediction completed"
    );

    Ok(Json(prediction))
}

/// Pull the image field out of the multipart upload.
async fn read_image_field(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
            if bytes.is_empty() {
                return Err(ApiError::MissingInput);
            }
            return Ok(bytes.to_vec());
        }
    }

    Err(ApiError::MissingInput)
}
