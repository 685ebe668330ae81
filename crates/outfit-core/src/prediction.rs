//! Classifier input and output values.

use std::fmt;

use crate::CoreError;

/// A dense `f32` tensor in NHWC layout (`[batch, height, width, channels]`).
///
/// The preprocessor produces `[1, H, W, 3]`; the classifier checks the shape
/// against the model's expected input before running a forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    shape: [usize; 4],
    data: Vec<f32>,
}

impl ImageTensor {
    /// Build a tensor from a shape and a flat row-major buffer.
    pub fn new(shape: [usize; 4], data: Vec<f32>) -> Result<Self, CoreError> {
        let expected = shape.iter().product::<usize>();
        if data.len() != expected {
            return Err(CoreError::TensorSize {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> [usize; 4] {
        self.shape
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

/// Result of one classification call: the predicted shirt category and the
/// model's score for it.
///
/// Immutable once built. `confidence` always lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    category: String,
    confidence: f32,
}

impl Prediction {
    /// Create a prediction. Confidence is clamped into `[0, 1]`; NaN becomes 0.
    pub fn new(category: impl Into<String>, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            category: category.into(),
            confidence,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Confidence formatted to two decimal places, e.g. `0.87`.
    pub fn confidence_label(&self) -> String {
        format!("{:.2}", self.confidence)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.category, self.confidence)
    }
}
