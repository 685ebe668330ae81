//! Labelled dataset manifest: a CSV with an image-path column and a category column.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::info;

use crate::GalleryError;

/// One manifest row, restricted to the two columns the builder needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    /// Image path relative to the dataset image root, with `/` separators.
    pub image_path: String,
    pub category: String,
}

/// Read every row of `path`, picking the named columns by header.
///
/// Backslash separators in image paths are normalised to `/`.
pub fn read_manifest(
    path: &Path,
    image_column: &str,
    category_column: &str,
) -> Result<Vec<ManifestRow>, GalleryError> {
    if !path.exists() {
        return Err(GalleryError::ManifestNotFound(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| GalleryError::MissingColumn {
                path: path.to_path_buf(),
                column: name.to_string(),
            })
    };
    let image_idx = column(image_column)?;
    let category_idx = column(category_column)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let (Some(image), Some(category)) = (record.get(image_idx), record.get(category_idx))
        else {
            continue;
        };
        rows.push(ManifestRow {
            image_path: image.trim().replace('\\', "/"),
            category: category.trim().to_string(),
        });
    }

    info!(rows = rows.len(), manifest = %path.display(), "read manifest");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_named_columns_in_any_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("train_labels.csv");
        fs::write(
            &path,
            "category_name,split,image_name\n\
             Jeans,train,img\\Jeans\\001.jpg\n\
             Skirt,train,img/Skirt/002.jpg\n",
        )
        .unwrap();

        let rows = read_manifest(&path, "image_name", "category_name").unwrap();
        assert_eq!(
            rows,
            vec![
                ManifestRow {
                    image_path: "img/Jeans/001.jpg".into(),
                    category: "Jeans".into(),
                },
                ManifestRow {
                    image_path: "img/Skirt/002.jpg".into(),
                    category: "Skirt".into(),
                },
            ]
        );
    }

    #[test]
    fn missing_column_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("labels.csv");
        fs::write(&path, "image_name,label\na.jpg,Jeans\n").unwrap();

        let err = read_manifest(&path, "image_name", "category_name").unwrap_err();
        assert!(matches!(
            err,
            GalleryError::MissingColumn { ref column, .. } if column == "category_name"
        ));
    }

    #[test]
    fn missing_file_is_error() {
        let err = read_manifest(Path::new("/nonexistent/labels.csv"), "a", "b").unwrap_err();
        assert!(matches!(err, GalleryError::ManifestNotFound(_)));
    }

    #[test]
    fn header_only_manifest_is_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("labels.csv");
        fs::write(&path, "image_name,category_name\n").unwrap();
        assert!(read_manifest(&path, "image_name", "category_name").unwrap().is_empty());
    }
}
