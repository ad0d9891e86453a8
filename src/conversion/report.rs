//! Run summary for a conversion.
//!
//! Counts what was kept and what was dropped, and why, so a user can tell
//! whether the thresholds or the category list need adjusting.

use std::fmt;
use std::path::PathBuf;

use crate::validation::RejectReason;

/// Counters accumulated while processing source databases.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversionCounts {
    /// Source databases processed.
    pub databases: usize,
    /// Entries visited across all databases.
    pub entries: usize,
    /// Entries written out as images.
    pub images_kept: usize,
    /// Entries dropped because no annotation survived.
    pub images_dropped: usize,
    /// Annotations accepted.
    pub annotations_kept: usize,
    /// Rejected: no polygon survived.
    pub rejected_empty_segmentation: usize,
    /// Rejected: area below threshold.
    pub rejected_small_area: usize,
    /// Rejected: box below minimum width or height.
    pub rejected_small_box: usize,
    /// Masks whose category is not configured.
    pub unknown_category: usize,
    /// Masks skipped as invalid.
    pub invalid_masks: usize,
}

impl ConversionCounts {
    /// Counts one rejected annotation.
    pub fn record_rejection(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::EmptySegmentation => self.rejected_empty_segmentation += 1,
            RejectReason::AreaTooSmall => self.rejected_small_area += 1,
            RejectReason::BoxTooSmall => self.rejected_small_box += 1,
        }
    }

    /// Total annotations rejected by validation.
    pub fn annotations_rejected(&self) -> usize {
        self.rejected_empty_segmentation + self.rejected_small_area + self.rejected_small_box
    }
}

/// Outcome of a completed conversion.
#[derive(Clone, Debug, Default)]
pub struct ConversionReport {
    /// The written COCO document.
    pub json_path: PathBuf,
    /// Folder holding the written images.
    pub image_dir: PathBuf,
    pub counts: ConversionCounts,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counts;
        writeln!(
            f,
            "Wrote {} images and {} annotations to {}",
            c.images_kept,
            c.annotations_kept,
            self.json_path.display()
        )?;
        writeln!(
            f,
            "  {} entries from {} database(s); {} dropped with no valid annotation",
            c.entries, c.databases, c.images_dropped
        )?;

        if c.annotations_rejected() > 0 {
            writeln!(
                f,
                "  rejected {} annotation(s): {} empty segmentation, {} small area, {} small box",
                c.annotations_rejected(),
                c.rejected_empty_segmentation,
                c.rejected_small_area,
                c.rejected_small_box
            )?;
        }
        if c.unknown_category > 0 {
            writeln!(f, "  ignored {} mask(s) with unknown category", c.unknown_category)?;
        }
        if c.invalid_masks > 0 {
            writeln!(f, "  skipped {} invalid mask(s)", c.invalid_masks)?;
        }

        Ok(())
    }
}
