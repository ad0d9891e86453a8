//! Source databases: where RGB images and their object masks come from.
//!
//! The aggregator only sees the [`SourceDatabase`] trait. Any type that can
//! report its length and hand out entries by index can feed a conversion.
//! Three implementations ship with the crate:
//! - [`InMemoryDatabase`]: entries already held in memory
//! - [`ManifestDatabase`]: a JSON manifest listing image and mask files
//! - [`DirectoryDatabase`]: one folder per image with a `masks/` subfolder

mod directory;
mod manifest;

pub use directory::DirectoryDatabase;
pub use manifest::{parse_manifest, Manifest, ManifestDatabase, ManifestEntry, ManifestMask};

use std::path::Path;

use image::RgbImage;

use crate::error::Mask2CocoError;
use crate::ir::BinaryMask;

/// One object mask and the category name it is labelled with.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskAnnotation {
    pub mask: BinaryMask,
    pub category_name: String,
}

impl MaskAnnotation {
    pub fn new(mask: BinaryMask, category_name: impl Into<String>) -> Self {
        Self {
            mask,
            category_name: category_name.into(),
        }
    }
}

/// An RGB image together with its ordered object masks.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageEntry {
    pub rgb_image: RgbImage,
    pub annotations: Vec<MaskAnnotation>,
}

impl ImageEntry {
    pub fn new(rgb_image: RgbImage, annotations: Vec<MaskAnnotation>) -> Self {
        Self {
            rgb_image,
            annotations,
        }
    }
}

/// Indexed, read-only access to image entries.
///
/// `entry(i)` must be repeatable for every `i` in `0..len()` and must not
/// change what later calls return.
pub trait SourceDatabase {
    /// Name used in log messages and errors.
    fn name(&self) -> &str;

    /// Number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Loads entry `index`.
    ///
    /// # Errors
    /// Returns an error if `index` is out of range or the entry's files
    /// cannot be read.
    fn entry(&self, index: usize) -> Result<ImageEntry, Mask2CocoError>;
}

/// A database backed by entries held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDatabase {
    name: String,
    entries: Vec<ImageEntry>,
}

impl InMemoryDatabase {
    pub fn new(name: impl Into<String>, entries: Vec<ImageEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn push(&mut self, entry: ImageEntry) {
        self.entries.push(entry);
    }
}

impl SourceDatabase for InMemoryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, index: usize) -> Result<ImageEntry, Mask2CocoError> {
        self.entries
            .get(index)
            .cloned()
            .ok_or_else(|| out_of_range(&self.name, index, self.entries.len()))
    }
}

pub(crate) fn out_of_range(name: &str, index: usize, len: usize) -> Mask2CocoError {
    Mask2CocoError::SourceEntry {
        source_name: name.to_string(),
        index,
        message: format!("index out of range (database has {} entries)", len),
    }
}

/// Loads an image file as 8-bit RGB.
pub(crate) fn load_rgb(path: &Path) -> Result<RgbImage, Mask2CocoError> {
    let image = image::open(path).map_err(|source| Mask2CocoError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgb8())
}

/// Loads a mask file; any nonzero luma value is foreground.
pub(crate) fn load_mask(path: &Path) -> Result<BinaryMask, Mask2CocoError> {
    let image = image::open(path).map_err(|source| Mask2CocoError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BinaryMask::from_luma(&image.to_luma8()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_entry_access_is_repeatable() {
        let entry = ImageEntry::new(
            RgbImage::new(4, 4),
            vec![MaskAnnotation::new(BinaryMask::empty(4, 4), "shoe")],
        );
        let db = InMemoryDatabase::new("mem", vec![entry.clone()]);

        assert_eq!(db.len(), 1);
        assert_eq!(db.entry(0).unwrap(), entry);
        assert_eq!(db.entry(0).unwrap(), entry);
    }

    #[test]
    fn test_in_memory_out_of_range() {
        let db = InMemoryDatabase::new("mem", Vec::new());
        assert!(db.is_empty());
        let err = db.entry(0).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
