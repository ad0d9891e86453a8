//! Records of a COCO detection/segmentation document.
//!
//! Field order in each struct is the key order written to disk.

use serde::{Deserialize, Serialize};

use super::bbox::BBoxXYWH;
use super::ids::{AnnotationId, CategoryId, ImageId, LicenseId};

/// The complete output document: metadata, category table, and the
/// accumulated images and annotations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetDocument {
    pub info: DatasetInfo,
    pub licenses: Vec<License>,
    pub categories: Vec<Category>,
    pub images: Vec<ImageInfo>,
    pub annotations: Vec<Annotation>,
}

/// Free-form metadata block written under `info`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetInfo {
    pub description: String,
    pub url: String,
    pub version: String,
    pub year: u32,
    pub contributor: String,

    /// Filled with the run's UTC timestamp when left unset.
    pub date_created: Option<String>,
}

impl Default for DatasetInfo {
    fn default() -> Self {
        Self {
            description: "Dense Correspondence COCO Dataset".to_string(),
            url: "https://github.com/RobotLocomotion/pytorch-dense-correspondence".to_string(),
            version: String::new(),
            year: 2018,
            contributor: String::new(),
            date_created: None,
        }
    }
}

/// A license that images may reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub id: LicenseId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl License {
    pub fn new(id: impl Into<LicenseId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: String::new(),
        }
    }
}

/// A configured object category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supercategory: Option<String>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            supercategory: None,
        }
    }
}

/// A kept image, described the way COCO expects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub id: ImageId,
    pub width: u32,
    pub height: u32,
    pub file_name: String,
    pub license: LicenseId,
    pub flickr_url: String,
    pub coco_url: String,
    pub date_captured: String,
}

impl ImageInfo {
    /// Creates the record for image `id`, naming it after the id.
    pub fn new(
        id: ImageId,
        width: u32,
        height: u32,
        license: LicenseId,
        date_captured: impl Into<String>,
    ) -> Self {
        Self {
            id,
            width,
            height,
            file_name: id.file_name(),
            license,
            flickr_url: String::new(),
            coco_url: String::new(),
            date_captured: date_captured.into(),
        }
    }
}

/// One closed ring flattened to `x0, y0, x1, y1, ...`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon(pub Vec<f64>);

impl Polygon {
    /// Number of (x, y) vertices in the ring, including the closing point.
    pub fn num_points(&self) -> usize {
        self.0.len() / 2
    }

    /// Iterates the ring's vertices as `(x, y)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.0.chunks_exact(2).map(|p| (p[0], p[1]))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// A polygon-form object annotation.
///
/// Built only by the annotation builder; `iscrowd` is always 0 since
/// run-length crowd annotations are never emitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub image_id: ImageId,
    pub category_id: CategoryId,
    pub segmentation: Vec<Polygon>,
    pub area: f64,
    pub bbox: BBoxXYWH,
    pub iscrowd: u8,
}
