//! Image normalization for classifier input.
//!
//! Turns an arbitrary uploaded image into the fixed-shape tensor the
//! classifier expects:
//! - decode (any format the `image` crate recognizes)
//! - convert to single-channel luma
//! - bilinear resize to 48x48, no aspect preservation
//! - rescale intensity to [0, 1]
//! - shape as `[1, 48, 48, 1]` (batch, height, width, channel)
//!
//! Deterministic for identical input bytes; no side effects.

use image::imageops::FilterType;
use ndarray::Array4;

use crate::error::{InferenceError, InferenceResult};

/// Model input edge length in pixels.
pub const INPUT_SIZE: u32 = 48;

/// Normalize raw encoded image bytes into a batch-of-one grayscale tensor.
///
/// Fails with [`InferenceError::Decode`] when the bytes cannot be parsed as
/// an image.
pub fn normalize(bytes: &[u8]) -> InferenceResult<Array4<f32>> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| InferenceError::decode(format!("unrecognized image data: {e}")))?;

    let gray = img
        .grayscale()
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
        .to_luma8();

    let size = INPUT_SIZE as usize;
    let mut tensor = Array4::<f32>::zeros((1, size, size, 1));
    for (x, y, pixel) in gray.enumerate_pixels() {
        tensor[[0, y as usize, x as usize, 0]] = pixel[0] as f32 / 255.0;
    }

    Ok(tensor)
}
