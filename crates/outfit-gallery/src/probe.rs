use std::path::PathBuf;

use tracing::warn;

/// Keep only example files that decode as images.
///
/// Each file is fully decoded, so a truncated file with an intact header is
/// dropped too. Dropped files are logged; the rest of the gallery is still shown.
pub fn readable_examples(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|path| match image::open(path) {
            Ok(_) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable example image");
                false
            }
        })
        .collect()
}
