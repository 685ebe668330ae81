//! ONNX Runtime backend for the shirt classifier.
//!
//! Loads a `.onnx` image classifier exported with an NHWC `f32` input
//! (`[batch, size, size, 3]`) and a single `[batch, classes]` score output.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::{Tensor, ValueType};
use outfit_core::ImageTensor;
use tracing::info;

use crate::{InferenceError, ScoreModel};

/// Classifier model backed by an ONNX Runtime session.
///
/// `Session::run` needs exclusive access, so the session sits behind a mutex;
/// the model itself is never modified after load.
pub struct OnnxModel {
    session: Mutex<Session>,
    input_shape: [usize; 4],
    output_width: Option<usize>,
}

impl OnnxModel {
    /// Load a model and check its declared input against a square `image_size` RGB input.
    pub fn load(model_path: &Path, image_size: u32) -> Result<Self, InferenceError> {
        let load_err = |reason: String| InferenceError::ArtifactLoad {
            path: model_path.to_path_buf(),
            reason,
        };

        if !model_path.exists() {
            return Err(load_err("file not found".into()));
        }

        let session = Session::builder()
            .map_err(|e| load_err(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| load_err(e.to_string()))?;

        let side = image_size as usize;
        let input_shape = [1, side, side, 3];

        let declared_input = session
            .inputs()
            .first()
            .ok_or_else(|| load_err("model has no inputs".into()))?;
        if let Some(dims) = tensor_dims(declared_input.dtype())
            && !dims_compatible(&dims, &input_shape)
        {
            return Err(load_err(format!(
                "model input {dims:?} is incompatible with {input_shape:?}"
            )));
        }

        let output_width = session
            .outputs()
            .first()
            .and_then(|o| tensor_dims(o.dtype()))
            .and_then(|dims| dims.last().copied())
            .and_then(|d| if d > 0 { Some(d as usize) } else { None });

        info!(
            model = %model_path.display(),
            input_shape = ?input_shape,
            output_width = ?output_width,
            "loaded classifier model"
        );
        Ok(Self {
            session: Mutex::new(session),
            input_shape,
            output_width,
        })
    }
}

impl ScoreModel for OnnxModel {
    fn input_shape(&self) -> [usize; 4] {
        self.input_shape
    }

    fn output_width(&self) -> Option<usize> {
        self.output_width
    }

    fn forward(&self, input: &ImageTensor) -> Result<Vec<f32>, InferenceError> {
        let shape = input.shape().map(|d| d as i64);
        let tensor = Tensor::from_array((shape, input.data().to_vec().into_boxed_slice()))
            .map_err(runtime)?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferenceError::Runtime("onnx session lock poisoned".into()))?;
        let outputs = session.run(ort::inputs![tensor]).map_err(runtime)?;

        let (_, scores) = outputs[0].try_extract_tensor::<f32>().map_err(runtime)?;
        Ok(scores.to_vec())
    }
}

fn runtime(e: impl std::fmt::Display) -> InferenceError {
    InferenceError::Runtime(e.to_string())
}

/// Declared dimensions of a tensor input/output; `-1` marks a dynamic axis.
fn tensor_dims(value_type: &ValueType) -> Option<Vec<i64>> {
    match value_type {
        ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
        _ => None,
    }
}

/// Static axes must match; dynamic axes accept anything.
fn dims_compatible(declared: &[i64], wanted: &[usize; 4]) -> bool {
    declared.len() == wanted.len()
        && declared
            .iter()
            .zip(wanted)
            .all(|(&d, &w)| d <= 0 || d as usize == w)
}
