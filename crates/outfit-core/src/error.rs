use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("config file not found: {0}")]
    ConfigNotFound(std::path::PathBuf),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error("tensor shape {shape:?} needs {expected} values, got {actual}")]
    TensorSize {
        shape: [usize; 4],
        expected: usize,
        actual: usize,
    },
}
