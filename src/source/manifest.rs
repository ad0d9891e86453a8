//! JSON manifest source.
//!
//! ```json
//! {
//!   "name": "scene_01",
//!   "entries": [
//!     {"image": "rgb/000.png", "masks": [{"mask": "mask/000_0.png", "category": "shoe"}]}
//!   ]
//! }
//! ```
//!
//! Relative paths resolve against the manifest's directory. Files are read
//! lazily, one entry at a time.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{load_mask, load_rgb, out_of_range, ImageEntry, MaskAnnotation, SourceDatabase};
use crate::error::Mask2CocoError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub entries: Vec<ManifestEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub image: PathBuf,
    #[serde(default)]
    pub masks: Vec<ManifestMask>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestMask {
    pub mask: PathBuf,
    pub category: String,
}

/// Parses manifest JSON from raw bytes.
pub fn parse_manifest(bytes: &[u8]) -> Result<Manifest, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// A database whose entries are listed in a manifest file.
#[derive(Clone, Debug)]
pub struct ManifestDatabase {
    name: String,
    base_dir: PathBuf,
    manifest: Manifest,
}

impl ManifestDatabase {
    /// Reads and parses a manifest file.
    ///
    /// The database is named after the manifest's `name` field, or the file
    /// stem when absent.
    pub fn open(path: &Path) -> Result<Self, Mask2CocoError> {
        let bytes = fs::read(path)?;
        let manifest = parse_manifest(&bytes).map_err(|source| Mask2CocoError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = manifest.name.clone().unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "manifest".to_string())
        });
        Ok(Self::from_manifest(name, base_dir, manifest))
    }

    /// Wraps an already-parsed manifest, resolving paths against `base_dir`.
    pub fn from_manifest(name: impl Into<String>, base_dir: impl Into<PathBuf>, manifest: Manifest) -> Self {
        Self {
            name: name.into(),
            base_dir: base_dir.into(),
            manifest,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl SourceDatabase for ManifestDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> usize {
        self.manifest.entries.len()
    }

    fn entry(&self, index: usize) -> Result<ImageEntry, Mask2CocoError> {
        let listed = self
            .manifest
            .entries
            .get(index)
            .ok_or_else(|| out_of_range(&self.name, index, self.len()))?;

        let rgb_image = load_rgb(&self.resolve(&listed.image))?;
        let annotations = listed
            .masks
            .iter()
            .map(|m| {
                Ok(MaskAnnotation::new(
                    load_mask(&self.resolve(&m.mask))?,
                    m.category.clone(),
                ))
            })
            .collect::<Result<Vec<_>, Mask2CocoError>>()?;

        Ok(ImageEntry::new(rgb_image, annotations))
    }
}
