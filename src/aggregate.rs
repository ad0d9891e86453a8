//! Walks source databases and accumulates images and annotations.
//!
//! Identifiers are assigned strictly in visiting order: database order, then
//! entry order, then mask order. Ids are committed only once an entry's
//! image has been written with at least one accepted annotation; an entry
//! that is dropped or fails consumes none, so both sequences are dense and
//! zero-based. An image's file name is a function of its final id alone.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::{debug, info, warn};

use crate::annotation::build_annotation;
use crate::config::InvalidMaskPolicy;
use crate::conversion::ConversionCounts;
use crate::error::Mask2CocoError;
use crate::ir::{Annotation, AnnotationId, CategoryTable, ImageId, ImageInfo, LicenseId};
use crate::source::{ImageEntry, SourceDatabase};
use crate::validation::ValidationThresholds;

/// Log a progress line every this many kept images.
const PROGRESS_EVERY: u64 = 20;

/// Settings the aggregator applies to every entry.
#[derive(Clone, Debug)]
pub struct AggregateOptions {
    pub thresholds: ValidationThresholds,
    pub image_license: LicenseId,
    pub date_captured: String,
    pub invalid_mask_policy: InvalidMaskPolicy,
}

/// Stateful accumulator for one conversion run.
pub struct DatasetAggregator<'a> {
    categories: &'a CategoryTable,
    image_dir: PathBuf,
    options: AggregateOptions,
    next_image_id: u64,
    next_annotation_id: u64,
    images: Vec<ImageInfo>,
    annotations: Vec<Annotation>,
    counts: ConversionCounts,
}

impl<'a> DatasetAggregator<'a> {
    /// Creates an aggregator writing image artifacts into `image_dir`.
    ///
    /// The directory must already exist.
    pub fn new(
        categories: &'a CategoryTable,
        image_dir: impl Into<PathBuf>,
        options: AggregateOptions,
    ) -> Self {
        Self {
            categories,
            image_dir: image_dir.into(),
            options,
            next_image_id: 0,
            next_annotation_id: 0,
            images: Vec::new(),
            annotations: Vec::new(),
            counts: ConversionCounts::default(),
        }
    }

    /// Processes every database in order.
    pub fn process_all(&mut self, databases: &[&dyn SourceDatabase]) -> Result<(), Mask2CocoError> {
        for database in databases {
            self.process_database(*database)?;
        }
        Ok(())
    }

    /// Processes every entry of one database in index order.
    pub fn process_database(&mut self, database: &dyn SourceDatabase) -> Result<(), Mask2CocoError> {
        info!(
            "Processing database '{}' ({} entries)",
            database.name(),
            database.len()
        );
        self.counts.databases += 1;
        for index in 0..database.len() {
            let entry = database.entry(index)?;
            self.process_entry(&entry)?;
        }
        Ok(())
    }

    /// Processes one entry. Returns the id of the kept image, or `None` when
    /// no annotation survived and the entry was dropped.
    pub fn process_entry(&mut self, entry: &ImageEntry) -> Result<Option<ImageId>, Mask2CocoError> {
        self.counts.entries += 1;

        let image_id = ImageId::new(self.next_image_id);
        let (width, height) = entry.rgb_image.dimensions();
        let mut staged: Vec<Annotation> = Vec::new();

        for mask_annotation in &entry.annotations {
            let Some(category_id) = self.categories.lookup(&mask_annotation.category_name) else {
                self.counts.unknown_category += 1;
                continue;
            };

            if mask_annotation.mask.dimensions() != (width, height) {
                let (mw, mh) = mask_annotation.mask.dimensions();
                let reason = format!(
                    "{}x{} mask for category '{}' does not match its {}x{} image",
                    mw, mh, mask_annotation.category_name, width, height
                );
                match self.options.invalid_mask_policy {
                    InvalidMaskPolicy::Abort => return Err(Mask2CocoError::invalid_mask(reason)),
                    InvalidMaskPolicy::Skip => {
                        warn!("Skipping annotation: {}", reason);
                        self.counts.invalid_masks += 1;
                        continue;
                    }
                }
            }

            // Staged ids are committed only once the image is written.
            let tentative = AnnotationId::new(self.next_annotation_id + staged.len() as u64);
            let built = build_annotation(
                tentative,
                image_id,
                category_id,
                &mask_annotation.mask,
                &self.options.thresholds,
            );
            match built.rejection {
                None => staged.push(built.annotation),
                Some(reason) => {
                    debug!(
                        "Rejected '{}' mask (area {}, bbox {:?}): {}",
                        mask_annotation.category_name,
                        built.annotation.area,
                        built.annotation.bbox.to_array(),
                        reason
                    );
                    self.counts.record_rejection(reason);
                }
            }
        }

        if staged.is_empty() {
            self.counts.images_dropped += 1;
            return Ok(None);
        }

        let image_info = ImageInfo::new(
            image_id,
            width,
            height,
            self.options.image_license,
            self.options.date_captured.clone(),
        );
        self.write_image(&entry.rgb_image, &image_info.file_name)?;

        self.next_annotation_id += staged.len() as u64;
        self.counts.annotations_kept += staged.len();
        self.annotations.append(&mut staged);
        self.images.push(image_info);
        self.counts.images_kept += 1;
        self.next_image_id += 1;

        if self.next_image_id % PROGRESS_EVERY == 0 {
            info!("Processing image {}", self.next_image_id);
        }

        Ok(Some(image_id))
    }

    fn write_image(&self, rgb: &image::RgbImage, file_name: &str) -> Result<(), Mask2CocoError> {
        let path = self.image_dir.join(file_name);
        rgb.save_with_format(&path, ImageFormat::Png)
            .map_err(|source| Mask2CocoError::ImageWrite { path, source })
    }

    /// Directory image artifacts are written to.
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Images kept so far.
    pub fn images(&self) -> &[ImageInfo] {
        &self.images
    }

    /// Annotations accepted so far.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Running counters.
    pub fn counts(&self) -> &ConversionCounts {
        &self.counts
    }

    /// Consumes the aggregator, returning the accumulated records.
    pub fn finish(self) -> (Vec<ImageInfo>, Vec<Annotation>, ConversionCounts) {
        (self.images, self.annotations, self.counts)
    }
}
