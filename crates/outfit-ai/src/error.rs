use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("cannot decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to load artifact {path}: {reason}")]
    ArtifactLoad { path: PathBuf, reason: String },

    #[error("label set has {labels} entries but the model outputs {outputs} scores")]
    LabelCountMismatch { labels: usize, outputs: usize },

    #[error("tensor shape {actual:?} does not match model input {expected:?}")]
    ShapeMismatch {
        expected: [usize; 4],
        actual: [usize; 4],
    },

    #[error("class index {index} out of range for {labels} labels")]
    IndexOutOfRange { index: usize, labels: usize },

    #[error("model produced no finite scores")]
    EmptyOutput,

    #[error("inference runtime error: {0}")]
    Runtime(String),

    #[error(transparent)]
    Core(#[from] outfit_core::CoreError),
}

impl InferenceError {
    /// Artifact problems detected at start-up; the process must not serve requests.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ArtifactLoad { .. } | Self::LabelCountMismatch { .. }
        )
    }

    /// Contract violations between preprocessing, model, and label set.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. }
                | Self::IndexOutOfRange { .. }
                | Self::EmptyOutput
                | Self::Runtime(_)
                | Self::Core(_)
        )
    }
}
