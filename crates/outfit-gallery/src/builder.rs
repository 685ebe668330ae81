//! Offline gallery population from a labelled manifest.
//!
//! For every configured category, a capped sample of matching manifest rows
//! is drawn with a seeded RNG and the referenced images are copied into
//! `gallery_root/<identifier>/`. Existing files are never overwritten, so a
//! re-run with the same manifest and seed leaves the tree unchanged.

use std::fs;
use std::path::Path;

use outfit_core::GalleryBuildConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::{GalleryError, ManifestRow, read_manifest};

/// Per-category outcome of a build run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryReport {
    /// Manifest category name.
    pub category: String,
    /// Gallery directory identifier.
    pub identifier: String,
    pub matched: usize,
    pub sampled: usize,
    pub copied: usize,
    pub already_present: usize,
    pub missing_source: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub categories: Vec<CategoryReport>,
}

impl BuildReport {
    pub fn matched_rows(&self) -> usize {
        self.categories.iter().map(|c| c.matched).sum()
    }

    pub fn copied(&self) -> usize {
        self.categories.iter().map(|c| c.copied).sum()
    }

    pub fn already_present(&self) -> usize {
        self.categories.iter().map(|c| c.already_present).sum()
    }

    pub fn missing_source(&self) -> usize {
        self.categories.iter().map(|c| c.missing_source).sum()
    }
}

/// Read the configured manifest and populate the gallery.
pub fn build_gallery(config: &GalleryBuildConfig) -> Result<BuildReport, GalleryError> {
    let rows = read_manifest(
        &config.manifest_path,
        &config.image_column,
        &config.category_column,
    )?;
    build_from_rows(&rows, config)
}

/// Populate the gallery from already-parsed manifest rows.
pub fn build_from_rows(
    rows: &[ManifestRow],
    config: &GalleryBuildConfig,
) -> Result<BuildReport, GalleryError> {
    fs::create_dir_all(&config.gallery_root)
        .map_err(|e| GalleryError::io(&config.gallery_root, e))?;

    let matching = rows
        .iter()
        .filter(|r| config.categories.contains_key(&r.category))
        .count();
    info!(rows = matching, "found rows for configured categories");

    let mut report = BuildReport::default();

    for (category, identifier) in &config.categories {
        let subset: Vec<&ManifestRow> = rows.iter().filter(|r| &r.category == category).collect();

        let mut entry = CategoryReport {
            category: category.clone(),
            identifier: identifier.clone(),
            matched: subset.len(),
            ..Default::default()
        };

        if subset.is_empty() {
            warn!(category = %category, "no manifest rows for category");
            report.categories.push(entry);
            continue;
        }

        // Fresh stream per category: one category's sample never depends on another's.
        let mut rng = StdRng::seed_from_u64(config.seed);
        let take = config.max_per_category.min(subset.len());
        let chosen: Vec<&ManifestRow> = subset.choose_multiple(&mut rng, take).copied().collect();
        entry.sampled = chosen.len();

        let out_dir = config.gallery_root.join(identifier);
        fs::create_dir_all(&out_dir).map_err(|e| GalleryError::io(&out_dir, e))?;

        info!(
            category = %category,
            identifier = %identifier,
            images = take,
            "creating gallery"
        );

        for row in chosen {
            let src = config.image_root.join(&row.image_path);
            let Some(file_name) = src.file_name() else {
                entry.missing_source += 1;
                continue;
            };
            if !src.is_file() {
                entry.missing_source += 1;
                continue;
            }

            let dst = out_dir.join(file_name);
            if dst.exists() {
                entry.already_present += 1;
                continue;
            }
            copy_file(&src, &dst)?;
            entry.copied += 1;
        }

        report.categories.push(entry);
    }

    info!(
        copied = report.copied(),
        already_present = report.already_present(),
        missing_source = report.missing_source(),
        gallery = %config.gallery_root.display(),
        "gallery build finished"
    );
    Ok(report)
}

fn copy_file(src: &Path, dst: &Path) -> Result<(), GalleryError> {
    fs::copy(src, dst).map_err(|e| GalleryError::io(dst, e))?;
    Ok(())
}
