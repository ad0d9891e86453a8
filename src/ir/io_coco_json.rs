//! COCO JSON document assembly and writing.
//!
//! The writer serializes the whole document in memory before touching the
//! filesystem, then writes a sibling temporary file and renames it over the
//! destination. A failed run therefore never leaves a truncated document.
//!
//! # Output shape
//!
//! ```text
//! { "info": {...}, "licenses": [...], "categories": [...],
//!   "images": [{id, width, height, file_name, license, flickr_url, coco_url, date_captured}],
//!   "annotations": [{id, image_id, category_id, segmentation, area, bbox, iscrowd}] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use super::model::{Annotation, Category, DatasetDocument, DatasetInfo, ImageInfo, License};
use crate::error::Mask2CocoError;

/// Assembles the final document. Pure aggregation: nothing is filtered,
/// reordered, or renumbered.
pub fn assemble(
    info: DatasetInfo,
    licenses: Vec<License>,
    categories: Vec<Category>,
    images: Vec<ImageInfo>,
    annotations: Vec<Annotation>,
) -> DatasetDocument {
    DatasetDocument {
        info,
        licenses,
        categories,
        images,
        annotations,
    }
}

/// Writes a document to a COCO JSON file.
///
/// # Arguments
/// * `path` - Path to the output file
/// * `document` - The document to write
/// * `pretty` - Indent the output instead of writing it compactly
///
/// # Errors
/// Returns an error if the document cannot be serialized or the destination
/// cannot be created.
pub fn write_coco_json(
    path: &Path,
    document: &DatasetDocument,
    pretty: bool,
) -> Result<(), Mask2CocoError> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(document)
    } else {
        serde_json::to_vec(document)
    }
    .map_err(|source| Mask2CocoError::CocoJsonWrite {
        path: path.to_path_buf(),
        source,
    })?;

    let staging = staging_path(path);
    fs::write(&staging, &bytes)?;
    if let Err(err) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(err.into());
    }
    Ok(())
}

/// Writes a document to a compact COCO JSON string.
///
/// Useful for testing without file I/O.
pub fn to_coco_string(document: &DatasetDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string(document)
}

/// Reads a document back from a COCO JSON string.
pub fn from_coco_str(json: &str) -> Result<DatasetDocument, serde_json::Error> {
    serde_json::from_str(json)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
