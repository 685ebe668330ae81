//! Random example sampling from the gallery tree.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::GalleryError;

/// Recognised gallery image extensions (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Read-only view over a gallery root. Nothing is cached: every call re-lists
/// the category directory.
#[derive(Debug, Clone)]
pub struct GallerySampler {
    root: PathBuf,
}

impl GallerySampler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All eligible image files for a category, in directory order.
    ///
    /// A missing directory, or an identifier that is not a single plain path
    /// segment, yields an empty list.
    pub fn list(&self, category: &str) -> Result<Vec<PathBuf>, GalleryError> {
        if !is_plain_segment(category) {
            warn!(category, "ignoring gallery identifier that is not a plain directory name");
            return Ok(Vec::new());
        }

        let dir = self.root.join(category);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                debug!(dir = %dir.display(), "gallery folder missing");
                return Ok(Vec::new());
            }
            Err(e) => return Err(GalleryError::io(&dir, e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| GalleryError::io(&dir, e))?.path();
            if path.is_file() && is_image_file(&path) {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Up to `max_images` distinct example files for a category.
    ///
    /// When the folder holds more than `max_images` eligible files a uniform
    /// random subset is drawn without replacement; otherwise all are returned.
    pub fn sample(&self, category: &str, max_images: usize) -> Result<Vec<PathBuf>, GalleryError> {
        self.sample_with_rng(category, max_images, &mut rand::thread_rng())
    }

    pub fn sample_with_rng<R: Rng + ?Sized>(
        &self,
        category: &str,
        max_images: usize,
        rng: &mut R,
    ) -> Result<Vec<PathBuf>, GalleryError> {
        let files = self.list(category)?;
        let eligible = files.len();

        let picked: Vec<PathBuf> = if eligible <= max_images {
            files
        } else {
            files.choose_multiple(rng, max_images).cloned().collect()
        };

        debug!(category, eligible, returned = picked.len(), "sampled gallery");
        Ok(picked)
    }
}

fn is_plain_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
