//! JSON configuration for the serving path and the offline gallery builder.
//!
//! Every field has a default, so a config file only needs the keys it changes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::{CoreError, RecommendationMap};

/// Gallery identifiers for the default bottom categories.
fn default_gallery_ids() -> BTreeMap<String, String> {
    [
        ("Jeans", "jeans"),
        ("Shorts", "shorts"),
        ("Skirt", "skirt"),
        ("Joggers", "joggers"),
        ("Dress", "dress_pants"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Serving configuration: artifact locations, model input size, recommendation data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Serialized classifier (`.onnx`).
    pub model_path: PathBuf,
    /// Class-names artifact (JSON array or one label per line).
    pub labels_path: PathBuf,
    /// Root of the `<gallery_root>/<identifier>/*.jpg` tree.
    pub gallery_root: PathBuf,
    /// Square input resolution expected by the classifier.
    pub image_size: u32,
    pub max_recommendations: usize,
    pub max_examples: usize,
    pub recommendations: RecommendationMap,
    /// Bottom category → gallery directory identifier.
    pub gallery_ids: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("shirt_model.onnx"),
            labels_path: PathBuf::from("class_names.json"),
            gallery_root: PathBuf::from("bottom_gallery"),
            image_size: 224,
            max_recommendations: 3,
            max_examples: 3,
            recommendations: RecommendationMap::default(),
            gallery_ids: default_gallery_ids(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        load_json(path)
    }

    /// Load `path` when given, otherwise fall back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CoreError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Gallery directory identifier for a bottom category.
    ///
    /// Uses the configured mapping, falling back to the lowercased name with
    /// spaces replaced by underscores (`Cargo Shorts` → `cargo_shorts`).
    pub fn gallery_id(&self, bottom: &str) -> String {
        match self.gallery_ids.get(bottom) {
            Some(id) => id.clone(),
            None => bottom.trim().to_lowercase().replace(' ', "_"),
        }
    }
}

/// Offline gallery builder configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryBuildConfig {
    /// Labelled CSV manifest.
    pub manifest_path: PathBuf,
    /// Directory that manifest image paths are relative to.
    pub image_root: PathBuf,
    pub gallery_root: PathBuf,
    pub max_per_category: usize,
    pub seed: u64,
    pub image_column: String,
    pub category_column: String,
    /// Manifest category name → gallery identifier.
    pub categories: BTreeMap<String, String>,
}

impl Default for GalleryBuildConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from("train_labels.csv"),
            image_root: PathBuf::from("."),
            gallery_root: PathBuf::from("bottom_gallery"),
            max_per_category: 20,
            seed: 42,
            image_column: "image_name".to_string(),
            category_column: "category_name".to_string(),
            categories: default_gallery_ids(),
        }
    }
}

impl GalleryBuildConfig {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        load_json(path)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, CoreError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    if !path.exists() {
        return Err(CoreError::ConfigNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&content).map_err(|source| CoreError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}
