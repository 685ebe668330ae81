use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("manifest {path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl GalleryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
