//! Inference layer: image preprocessing, label artifacts, and the shirt classifier.
//!
//! The ONNX Runtime backend is gated behind the `onnx` feature; everything
//! else works against the [`ScoreModel`] trait.

mod classifier;
mod error;
mod labels;
mod preprocess;

#[cfg(feature = "onnx")]
mod onnx;

pub use classifier::{Classifier, ScoreModel, SharedClassifier, argmax_first};
pub use error::InferenceError;
pub use labels::LabelSet;
pub use preprocess::{DEFAULT_INPUT_SIZE, decode, preprocess, preprocess_bytes, preprocess_path};

#[cfg(feature = "onnx")]
pub use onnx::OnnxModel;
