//! Image → classifier input tensor.
//!
//! Steps must match what the model saw during training: force three-channel
//! RGB, resize to a square with a bicubic filter, scale `u8` intensities into
//! `[0, 1]`, and add a leading batch dimension. Output layout is NHWC
//! `[1, size, size, 3]`.

use std::path::Path;

use image::DynamicImage;
use image::imageops::{self, FilterType};
use outfit_core::ImageTensor;

use crate::InferenceError;

/// Square input resolution of the shirt classifier.
pub const DEFAULT_INPUT_SIZE: u32 = 224;

const RESAMPLE_FILTER: FilterType = FilterType::CatmullRom;

/// Decode an uploaded image from raw bytes (format sniffed from content).
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, InferenceError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Convert a decoded image into a `[1, size, size, 3]` tensor with values in `[0, 1]`.
pub fn preprocess(image: &DynamicImage, size: u32) -> Result<ImageTensor, InferenceError> {
    let rgb = image.to_rgb8();
    let resized = imageops::resize(&rgb, size, size, RESAMPLE_FILTER);

    let data: Vec<f32> = resized
        .into_raw()
        .into_iter()
        .map(|v| f32::from(v) / 255.0)
        .collect();

    let side = size as usize;
    Ok(ImageTensor::new([1, side, side, 3], data)?)
}

/// Decode and preprocess in one step.
pub fn preprocess_bytes(bytes: &[u8], size: u32) -> Result<ImageTensor, InferenceError> {
    preprocess(&decode(bytes)?, size)
}

pub fn preprocess_path(path: &Path, size: u32) -> Result<ImageTensor, InferenceError> {
    preprocess(&image::open(path)?, size)
}
