//! Class-name artifact: the ordered label list paired with a trained model.
//!
//! Index `i` names the classifier's `i`-th output. The order must be the one
//! used at training time; nothing here can detect a reordering.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::InferenceError;

/// Ordered class labels, immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Build from an in-memory list. Fails on an empty list.
    pub fn new(labels: Vec<String>) -> Result<Self, InferenceError> {
        if labels.is_empty() {
            return Err(InferenceError::ArtifactLoad {
                path: Default::default(),
                reason: "label set is empty".into(),
            });
        }
        Ok(Self { labels })
    }

    /// Load a `.json` array of strings, or any other file as one label per line.
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        let artifact_err = |reason: String| InferenceError::ArtifactLoad {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| artifact_err(e.to_string()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let labels: Vec<String> = if is_json {
            serde_json::from_str(&content).map_err(|e| artifact_err(e.to_string()))?
        } else {
            content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()
        };

        if labels.is_empty() {
            return Err(artifact_err("label set is empty".into()));
        }

        info!(count = labels.len(), path = %path.display(), "loaded class labels");
        Ok(Self { labels })
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}
