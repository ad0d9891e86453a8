//! Scene-folder source.
//!
//! ```text
//! <root>/
//!   scene_a/
//!     rgb.png
//!     masks/
//!       shoe.png
//!       coffee_mug_0.png
//!       coffee_mug_1.png
//!   scene_b/
//!     ...
//! ```
//!
//! Every subfolder holding an `rgb.png` is one entry. A mask's category is
//! its file stem with any trailing `_<digits>` suffix removed. Entries and
//! masks are ordered by file name so ids come out the same on every run.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{load_mask, load_rgb, out_of_range, ImageEntry, MaskAnnotation, SourceDatabase};
use crate::error::Mask2CocoError;

const RGB_FILE: &str = "rgb.png";
const MASK_DIR: &str = "masks";

/// A database scanned from a directory of scene folders.
#[derive(Clone, Debug)]
pub struct DirectoryDatabase {
    name: String,
    entries: Vec<PathBuf>,
}

impl DirectoryDatabase {
    /// Scans `root` for scene folders.
    pub fn open(root: &Path) -> Result<Self, Mask2CocoError> {
        let mut entries = Vec::new();
        for dir_entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let dir_entry = dir_entry.map_err(walk_error)?;
            if dir_entry.file_type().is_dir() && dir_entry.path().join(RGB_FILE).is_file() {
                entries.push(dir_entry.into_path());
            }
        }

        let name = root
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        Ok(Self { name, entries })
    }

    /// Scene folders in processing order.
    pub fn scene_dirs(&self) -> &[PathBuf] {
        &self.entries
    }
}

impl SourceDatabase for DirectoryDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&self, index: usize) -> Result<ImageEntry, Mask2CocoError> {
        let scene = self
            .entries
            .get(index)
            .ok_or_else(|| out_of_range(&self.name, index, self.entries.len()))?;

        let rgb_image = load_rgb(&scene.join(RGB_FILE))?;

        let mut annotations = Vec::new();
        let mask_dir = scene.join(MASK_DIR);
        if mask_dir.is_dir() {
            for dir_entry in WalkDir::new(&mask_dir)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
            {
                let dir_entry = dir_entry.map_err(walk_error)?;
                let path = dir_entry.path();
                let is_png = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
                if !dir_entry.file_type().is_file() || !is_png {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                annotations.push(MaskAnnotation::new(load_mask(path)?, category_from_stem(stem)));
            }
        }

        Ok(ImageEntry::new(rgb_image, annotations))
    }
}

/// `shoe` -> `shoe`, `coffee_mug_2` -> `coffee_mug`.
fn category_from_stem(stem: &str) -> &str {
    match stem.rsplit_once('_') {
        Some((head, tail))
            if !head.is_empty() && !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) =>
        {
            head
        }
        _ => stem,
    }
}

fn walk_error(err: walkdir::Error) -> Mask2CocoError {
    match err.into_io_error() {
        Some(io) => Mask2CocoError::Io(io),
        None => Mask2CocoError::Io(std::io::Error::other("directory loop while scanning")),
    }
}
