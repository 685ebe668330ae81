//! Example-image gallery: `<gallery_root>/<identifier>/*.{jpg,jpeg,png}`.
//!
//! The sampler reads the tree per request; the builder populates it offline
//! from a labelled manifest.

mod builder;
mod error;
mod manifest;
mod probe;
mod sampler;

pub use builder::{BuildReport, CategoryReport, build_from_rows, build_gallery};
pub use error::GalleryError;
pub use manifest::{ManifestRow, read_manifest};
pub use probe::readable_examples;
pub use sampler::{GallerySampler, IMAGE_EXTENSIONS, is_image_file};
